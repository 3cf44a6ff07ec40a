//! Colors the sky reads from the active theme's CSS custom properties.

/// CSS variables backing each color role, in field order.
pub const ROLE_VARS: [&str; 6] = [
    "--accent",
    "--p2",
    "--p3",
    "--cloud-top",
    "--cloud-mid",
    "--cloud-bottom",
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    pub accent: String,
    pub glow2: String,
    pub glow3: String,
    pub cloud_top: String,
    pub cloud_mid: String,
    pub cloud_bottom: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            accent: "#ffffff".into(),
            glow2: "#ffffff".into(),
            glow3: "#ffffff".into(),
            cloud_top: "rgba(255,255,255,0.75)".into(),
            cloud_mid: "rgba(227,241,255,0.4)".into(),
            cloud_bottom: "rgba(197,219,255,0.2)".into(),
        }
    }
}

impl Palette {
    /// Build a palette from a CSS variable lookup. Unset or blank variables
    /// keep their default color.
    pub fn from_lookup<F>(mut lookup: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut palette = Self::default();
        for (var, slot) in ROLE_VARS.into_iter().zip(palette.slots_mut()) {
            if let Some(value) = lookup(var) {
                let value = value.trim();
                if !value.is_empty() {
                    *slot = value.to_owned();
                }
            }
        }
        palette
    }

    fn slots_mut(&mut self) -> [&mut String; 6] {
        [
            &mut self.accent,
            &mut self.glow2,
            &mut self.glow3,
            &mut self.cloud_top,
            &mut self.cloud_mid,
            &mut self.cloud_bottom,
        ]
    }

    /// Fill for the drifting dots: the accent at ~20% alpha.
    pub fn dot_fill(&self) -> String {
        format!("{}33", self.accent)
    }
}
