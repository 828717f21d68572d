//! Built-in identifier names provided by the host environment.
//!
//! A bare word that matches one of these names is passed through as an
//! identifier instead of being coerced to a string literal.

use std::collections::HashSet;

/// Names exposed by the canvas, audio, math and lifecycle APIs of the runtime.
const BUILTIN_KEYWORDS: &[&str] = &[
    // Canvas
    "background",
    "fill",
    "noFill",
    "stroke",
    "noStroke",
    "strokeWeight",
    "circle",
    "ellipse",
    "rect",
    "square",
    "line",
    "point",
    "triangle",
    "polygon",
    "arc",
    "text",
    "textSize",
    "textAlign",
    "image",
    "push",
    "pop",
    "translate",
    "rotate",
    "scale",
    "clear",
    "width",
    "height",
    "canvas",
    "ctx",
    "rgb",
    "rgba",
    "hsl",
    "hsla",
    "color",
    "glow",
    "blendMode",
    // Audio
    "audio",
    "getVolume",
    "getFrequency",
    "getFrequencies",
    "getWaveform",
    "volume",
    "bass",
    "mid",
    "treble",
    "beat",
    "isBeat",
    "fft",
    "playAudio",
    "pauseAudio",
    "loadAudio",
    // Math
    "Math",
    "PI",
    "TWO_PI",
    "HALF_PI",
    "sin",
    "cos",
    "tan",
    "atan2",
    "abs",
    "floor",
    "ceil",
    "round",
    "min",
    "max",
    "sqrt",
    "pow",
    "random",
    "noise",
    "map",
    "lerp",
    "constrain",
    "dist",
    // Lifecycle and language
    "setup",
    "draw",
    "time",
    "frameCount",
    "deltaTime",
    "mouseX",
    "mouseY",
    "log",
    "settings",
    "true",
    "false",
    "null",
    "undefined",
    "this",
    "new",
    "return",
    "break",
    "continue",
    "Array",
    "Object",
    "String",
    "Number",
    "JSON",
    "console",
];

/// Set of identifier names recognised as built-ins
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet {
    names: HashSet<String>,
}

impl KeywordSet {
    /// An empty set; every unknown bare word will be quoted.
    pub fn new() -> Self {
        Self::default()
    }

    /// The default host keyword list
    pub fn builtin() -> Self {
        Self::from_list(BUILTIN_KEYWORDS.iter().copied())
    }

    pub fn from_list<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>) {
        self.names.insert(name.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> Extend<S> for KeywordSet {
    fn extend<T: IntoIterator<Item = S>>(&mut self, iter: T) {
        self.names.extend(iter.into_iter().map(Into::into));
    }
}
