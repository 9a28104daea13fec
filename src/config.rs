//! Carousel configuration: options, defaults, JSON loading, and validation.
//!
//! JSON documents use the option names `resizeDebounce`, `duration`,
//! `easing`, `perPage`, `startIndex`, `draggable`, `threshold` and `loop`.
//! Every field is optional.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;
use std::time::Duration;

use derive_setters::Setters;
use serde::de::{self, MapAccess, Unexpected, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::constants;
use crate::math::CubicBezier;
use crate::slider::SlideInfo;

/// Errors produced while loading or validating a [`CarouselConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse carousel config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid easing `{0}`")]
    InvalidEasing(String),
    #[error("per-page count must be at least 1")]
    ZeroPerPage,
    #[error("drag threshold must be a finite, non-negative number (got {0})")]
    InvalidThreshold(f64),
}

/// How many slides are visible at once.
///
/// Deserializes from either a number or an object keyed by viewport width.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PerPage {
    /// Always show this many slides.
    Fixed(usize),
    /// Viewport-width thresholds (px) mapped to slide counts. The entry with
    /// the largest threshold strictly below the viewport width wins.
    Breakpoints(BTreeMap<u32, usize>),
}

impl Default for PerPage {
    fn default() -> Self {
        PerPage::Fixed(1)
    }
}

impl From<usize> for PerPage {
    fn from(count: usize) -> Self {
        PerPage::Fixed(count)
    }
}

impl FromIterator<(u32, usize)> for PerPage {
    fn from_iter<I: IntoIterator<Item = (u32, usize)>>(iter: I) -> Self {
        PerPage::Breakpoints(iter.into_iter().collect())
    }
}

impl<'de> Deserialize<'de> for PerPage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PerPageVisitor;

        impl<'de> Visitor<'de> for PerPageVisitor {
            type Value = PerPage;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a slide count or a map of viewport widths to slide counts")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<PerPage, E> {
                usize::try_from(v)
                    .map(PerPage::Fixed)
                    .map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<PerPage, E> {
                usize::try_from(v)
                    .map(PerPage::Fixed)
                    .map_err(|_| E::invalid_value(Unexpected::Signed(v), &self))
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<PerPage, A::Error> {
                let mut map = BTreeMap::new();
                while let Some((key, count)) = access.next_entry::<String, usize>()? {
                    let width = key.trim().parse::<u32>().map_err(|_| {
                        de::Error::invalid_value(Unexpected::Str(&key), &"a viewport width in px")
                    })?;
                    map.insert(width, count);
                }
                Ok(PerPage::Breakpoints(map))
            }
        }

        deserializer.deserialize_any(PerPageVisitor)
    }
}

impl PerPage {
    /// Slide count for a viewport `viewport_width` px wide.
    ///
    /// Breakpoint maps default to 1 when no threshold is exceeded.
    pub fn resolve(&self, viewport_width: f64) -> usize {
        match self {
            PerPage::Fixed(count) => *count,
            PerPage::Breakpoints(map) => map
                .iter()
                .rev()
                .find(|(threshold, _)| viewport_width > f64::from(**threshold))
                .map(|(_, count)| *count)
                .unwrap_or(1),
        }
    }

    fn has_zero(&self) -> bool {
        match self {
            PerPage::Fixed(count) => *count == 0,
            PerPage::Breakpoints(map) => map.values().any(|count| *count == 0),
        }
    }
}

/// Slide transition timing curve, written in CSS syntax.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Easing {
    Linear,
    Ease,
    EaseIn,
    #[default]
    EaseOut,
    EaseInOut,
    CubicBezier(f64, f64, f64, f64),
}

impl Easing {
    fn control_points(&self) -> Option<(f64, f64, f64, f64)> {
        match *self {
            Easing::Linear => None,
            Easing::Ease => Some((0.25, 0.1, 0.25, 1.0)),
            Easing::EaseIn => Some((0.42, 0.0, 1.0, 1.0)),
            Easing::EaseOut => Some((0.0, 0.0, 0.58, 1.0)),
            Easing::EaseInOut => Some((0.42, 0.0, 0.58, 1.0)),
            Easing::CubicBezier(x1, y1, x2, y2) => Some((x1, y1, x2, y2)),
        }
    }

    /// Eased progress for linear progress `t` in 0.0–1.0.
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self.control_points() {
            None => t,
            Some((x1, y1, x2, y2)) => CubicBezier::new(x1, y1, x2, y2).apply(t),
        }
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Easing::Linear => f.write_str("linear"),
            Easing::Ease => f.write_str("ease"),
            Easing::EaseIn => f.write_str("ease-in"),
            Easing::EaseOut => f.write_str("ease-out"),
            Easing::EaseInOut => f.write_str("ease-in-out"),
            Easing::CubicBezier(x1, y1, x2, y2) => {
                write!(f, "cubic-bezier({x1}, {y1}, {x2}, {y2})")
            }
        }
    }
}

impl FromStr for Easing {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let easing = match trimmed {
            "linear" => Easing::Linear,
            "ease" => Easing::Ease,
            "ease-in" => Easing::EaseIn,
            "ease-out" => Easing::EaseOut,
            "ease-in-out" => Easing::EaseInOut,
            _ => {
                let args = trimmed
                    .strip_prefix("cubic-bezier(")
                    .and_then(|rest| rest.strip_suffix(')'))
                    .ok_or_else(|| ConfigError::InvalidEasing(s.to_string()))?;
                let values = args
                    .split(',')
                    .map(|v| v.trim().parse::<f64>())
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|_| ConfigError::InvalidEasing(s.to_string()))?;
                let [x1, y1, x2, y2] = values[..] else {
                    return Err(ConfigError::InvalidEasing(s.to_string()));
                };
                // CSS confines the x control points to [0, 1].
                if !(0.0..=1.0).contains(&x1) || !(0.0..=1.0).contains(&x2) {
                    return Err(ConfigError::InvalidEasing(s.to_string()));
                }
                Easing::CubicBezier(x1, y1, x2, y2)
            }
        };
        Ok(easing)
    }
}

impl TryFrom<String> for Easing {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Easing> for String {
    fn from(easing: Easing) -> Self {
        easing.to_string()
    }
}

/// A lifecycle callback receiving a snapshot of the carousel.
///
/// The default callback does nothing.
#[derive(Clone, Default)]
pub struct Callback(Option<Rc<dyn Fn(&SlideInfo)>>);

impl Callback {
    pub fn new(f: impl Fn(&SlideInfo) + 'static) -> Self {
        Self(Some(Rc::new(f)))
    }

    pub fn call(&self, info: &SlideInfo) {
        if let Some(f) = &self.0 {
            f(info);
        }
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.0.is_some() {
            "Callback(..)"
        } else {
            "Callback(noop)"
        })
    }
}

/// Options for a carousel. Construct with [`Default`] and chain setters:
///
/// ```rust
/// use floem_siema::CarouselConfig;
///
/// let config = CarouselConfig::default()
///     .per_page(2usize)
///     .looping(true)
///     .threshold(30.0);
/// assert_eq!(config.per_page.resolve(800.0), 2);
/// ```
#[derive(Debug, Clone, Setters, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CarouselConfig {
    /// Delay (ms) used to coalesce bursts of window resizes.
    #[serde(rename = "resizeDebounce")]
    pub resize_debounce_ms: u64,
    /// Slide transition duration (ms).
    #[serde(rename = "duration")]
    pub duration_ms: u64,
    /// Slide transition timing curve.
    pub easing: Easing,
    /// Slides visible at once.
    #[setters(into)]
    pub per_page: PerPage,
    /// Slide shown on mount.
    pub start_index: usize,
    /// Whether pointer drags move the carousel.
    pub draggable: bool,
    /// Minimum horizontal drag distance (px) that navigates.
    pub threshold: f64,
    /// Whether `prev`/`next` wrap around at either end.
    #[serde(rename = "loop")]
    pub looping: bool,
    /// Fired after every initialization.
    #[serde(skip)]
    #[setters(skip)]
    pub on_init: Callback,
    /// Fired after every navigation.
    #[serde(skip)]
    #[setters(skip)]
    pub on_change: Callback,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            resize_debounce_ms: constants::RESIZE_DEBOUNCE_MS,
            duration_ms: constants::DURATION_MS,
            easing: Easing::default(),
            per_page: PerPage::default(),
            start_index: 0,
            draggable: true,
            threshold: constants::THRESHOLD,
            looping: false,
            on_init: Callback::default(),
            on_change: Callback::default(),
        }
    }
}

impl CarouselConfig {
    /// Parse a JSON config document. Missing options take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets the callback fired after every initialization.
    pub fn on_init(mut self, f: impl Fn(&SlideInfo) + 'static) -> Self {
        self.on_init = Callback::new(f);
        self
    }

    /// Sets the callback fired after every navigation.
    pub fn on_change(mut self, f: impl Fn(&SlideInfo) + 'static) -> Self {
        self.on_change = Callback::new(f);
        self
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }

    /// Report options the carousel would silently clamp.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.per_page.has_zero() {
            return Err(ConfigError::ZeroPerPage);
        }
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(ConfigError::InvalidThreshold(self.threshold));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = CarouselConfig::default();
        assert_eq!(config.resize_debounce(), Duration::from_millis(250));
        assert_eq!(config.duration(), Duration::from_millis(200));
        assert_eq!(config.easing, Easing::EaseOut);
        assert_eq!(config.per_page, PerPage::Fixed(1));
        assert_eq!(config.start_index, 0);
        assert!(config.draggable);
        assert_eq!(config.threshold, 20.0);
        assert!(!config.looping);
    }

    #[test]
    fn breakpoints_pick_largest_exceeded_threshold() {
        let per_page: PerPage = [(0, 1), (640, 2), (1024, 4)].into_iter().collect();
        assert_eq!(per_page.resolve(320.0), 1);
        assert_eq!(per_page.resolve(640.0), 1);
        assert_eq!(per_page.resolve(641.0), 2);
        assert_eq!(per_page.resolve(1920.0), 4);
    }

    #[test]
    fn breakpoints_default_to_one() {
        let per_page: PerPage = [(800, 3)].into_iter().collect();
        assert_eq!(per_page.resolve(500.0), 1);
        assert_eq!(PerPage::Breakpoints(BTreeMap::new()).resolve(2000.0), 1);
    }

    #[test]
    fn json_uses_camel_case_option_names() {
        let config = CarouselConfig::from_json(
            r#"{
                "resizeDebounce": 100,
                "duration": 350,
                "easing": "cubic-bezier(0.4, 0, 0.2, 1)",
                "perPage": { "600": 2, "1000": 3 },
                "startIndex": 2,
                "draggable": false,
                "threshold": 40,
                "loop": true
            }"#,
        )
        .unwrap();

        assert_eq!(config.resize_debounce_ms, 100);
        assert_eq!(config.duration_ms, 350);
        assert_eq!(config.easing, Easing::CubicBezier(0.4, 0.0, 0.2, 1.0));
        assert_eq!(config.per_page.resolve(700.0), 2);
        assert_eq!(config.per_page.resolve(1200.0), 3);
        assert_eq!(config.start_index, 2);
        assert!(!config.draggable);
        assert_eq!(config.threshold, 40.0);
        assert!(config.looping);
    }

    #[test]
    fn json_fills_missing_options_with_defaults() {
        let config = CarouselConfig::from_json(r#"{ "perPage": 3 }"#).unwrap();
        assert_eq!(config.per_page, PerPage::Fixed(3));
        assert_eq!(config.duration_ms, 200);
        assert!(config.draggable);
    }

    #[test]
    fn json_rejects_unknown_easing() {
        let err = CarouselConfig::from_json(r#"{ "easing": "bouncy" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn easing_parses_css_syntax() {
        assert_eq!("ease-in-out".parse::<Easing>().unwrap(), Easing::EaseInOut);
        assert_eq!(" linear ".parse::<Easing>().unwrap(), Easing::Linear);
        assert_eq!(
            "cubic-bezier(0.1, -0.5, 0.9, 1.5)".parse::<Easing>().unwrap(),
            Easing::CubicBezier(0.1, -0.5, 0.9, 1.5)
        );
        assert!("cubic-bezier(1.2, 0, 0, 1)".parse::<Easing>().is_err());
        assert!("cubic-bezier(0, 0, 1)".parse::<Easing>().is_err());
        assert!("steps(4)".parse::<Easing>().is_err());
    }

    #[test]
    fn easing_display_round_trips_named_curves() {
        for easing in [Easing::Linear, Easing::Ease, Easing::EaseOut] {
            assert_eq!(easing.to_string().parse::<Easing>().unwrap(), easing);
        }
    }

    #[test]
    fn validate_flags_zero_per_page_and_bad_threshold() {
        assert!(CarouselConfig::default().validate().is_ok());
        assert!(matches!(
            CarouselConfig::default().per_page(0usize).validate(),
            Err(ConfigError::ZeroPerPage)
        ));
        let breakpoints: PerPage = [(0, 1), (900, 0)].into_iter().collect();
        assert!(matches!(
            CarouselConfig::default().per_page(breakpoints).validate(),
            Err(ConfigError::ZeroPerPage)
        ));
        assert!(matches!(
            CarouselConfig::default().threshold(-1.0).validate(),
            Err(ConfigError::InvalidThreshold(_))
        ));
    }

    #[test]
    fn callbacks_default_to_noop() {
        let config = CarouselConfig::default();
        let info = SlideInfo {
            current_slide: 0,
            per_page: 1,
            item_count: 0,
            container_width: 0.0,
        };
        config.on_init.call(&info);
        config.on_change.call(&info);
    }
}
