/// Light/dark theme state
///
/// [`ThemeContext`] owns the current mode, persists it under [`THEME_KEY`]
/// and drives a 400 ms fade between the two palettes. Storage failures never
/// surface to the caller: a failed read falls back to light mode and a failed
/// write still flips the in-memory mode.
pub mod animation;
pub mod color;
pub mod palette;
pub mod store;

pub use animation::{FadeAnimation, FADE_DURATION};
pub use palette::{AnimatedPalette, Palette, DARK, LIGHT};
pub use store::{FileThemeStore, MemoryThemeStore, ThemeStore, THEME_KEY};

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    /// Anything other than `"dark"` reads as light
    pub fn from_stored(value: &str) -> Self {
        if value == "dark" {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    fn fade_target(self) -> f32 {
        match self {
            ThemeMode::Light => 0.0,
            ThemeMode::Dark => 1.0,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct ThemeContext {
    mode: ThemeMode,
    store: Arc<dyn ThemeStore>,
    fade: FadeAnimation,
}

impl ThemeContext {
    /// Restore the saved mode. The fade starts from light and heads to the
    /// restored mode.
    pub async fn load(store: Arc<dyn ThemeStore>) -> Self {
        Self::load_at(store, Instant::now()).await
    }

    pub async fn load_at(store: Arc<dyn ThemeStore>, now: Instant) -> Self {
        let mode = match store.get_item(THEME_KEY).await {
            Ok(Some(saved)) => ThemeMode::from_stored(&saved),
            Ok(None) => ThemeMode::Light,
            Err(e) => {
                tracing::warn!(error = %e, "failed to load theme preference, using light");
                ThemeMode::Light
            }
        };

        let mut fade = FadeAnimation::new(0.0);
        fade.retarget(mode.fade_target(), now);

        Self { mode, store, fade }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn is_dark(&self) -> bool {
        self.mode == ThemeMode::Dark
    }

    pub fn palette(&self) -> &'static Palette {
        match self.mode {
            ThemeMode::Light => &LIGHT,
            ThemeMode::Dark => &DARK,
        }
    }

    pub async fn toggle(&mut self) -> ThemeMode {
        self.toggle_at(Instant::now()).await
    }

    /// Flip the mode, persist it and retarget the fade from its current value
    pub async fn toggle_at(&mut self, now: Instant) -> ThemeMode {
        self.mode = self.mode.toggled();
        self.fade.retarget(self.mode.fade_target(), now);

        if let Err(e) = self.store.set_item(THEME_KEY, self.mode.as_str()).await {
            tracing::warn!(error = %e, mode = %self.mode, "failed to save theme preference");
        }

        self.mode
    }

    /// 0.0 fully light, 1.0 fully dark
    pub fn fade_value(&self, now: Instant) -> f32 {
        self.fade.value_at(now)
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.fade.is_running(now)
    }

    pub fn interpolate(&self, light: &str, dark: &str, now: Instant) -> String {
        color::interpolate(light, dark, self.fade_value(now))
    }

    pub fn animated_palette(&self, now: Instant) -> AnimatedPalette {
        AnimatedPalette::at(self.fade_value(now))
    }
}
