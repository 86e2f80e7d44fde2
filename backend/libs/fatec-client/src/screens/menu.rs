/// Home screen entries
use crate::theme::ThemeContext;
use std::time::Instant;

pub const HEADER: &str = "InfoFatec";
pub const WELCOME_TITLE: &str = "Seja bem-vindo! 👋";
pub const WELCOME_TEXT: &str = "Bem-vindo ao sistema informacional da FATEC Cotia. Clique abaixo para conhecer mais sobre nossa instituição!";

/// Screen a menu entry opens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Cultura,
    Educacao,
    Empregos,
    Seguranca,
    Sobre,
}

impl Destination {
    pub fn route(&self) -> &'static str {
        match self {
            Destination::Cultura => "/(stack)/cultura",
            Destination::Educacao => "/(stack)/educacao",
            Destination::Empregos => "/(stack)/empregos",
            Destination::Seguranca => "/(stack)/seguranca",
            Destination::Sobre => "/(stack)/aboutme",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub title: &'static str,
    pub destination: Destination,
    pub color_light: &'static str,
    pub color_dark: &'static str,
}

impl MenuItem {
    /// Indicator colour at the current point of the theme fade
    pub fn indicator_color(&self, theme: &ThemeContext, now: Instant) -> String {
        theme.interpolate(self.color_light, self.color_dark, now)
    }
}

pub static MENU: [MenuItem; 5] = [
    MenuItem {
        title: "Cultura",
        destination: Destination::Cultura,
        color_light: "#ff6b6b",
        color_dark: "#4fc3f7",
    },
    MenuItem {
        title: "Educação",
        destination: Destination::Educacao,
        color_light: "#ffa726",
        color_dark: "#7c4dff",
    },
    MenuItem {
        title: "Empregos",
        destination: Destination::Empregos,
        color_light: "#ff7043",
        color_dark: "#00bcd4",
    },
    MenuItem {
        title: "Segurança",
        destination: Destination::Seguranca,
        color_light: "#ec407a",
        color_dark: "#26c6da",
    },
    MenuItem {
        title: "Sobre",
        destination: Destination::Sobre,
        color_light: "#fd00e8ff",
        color_dark: "#26c6da",
    },
];

/// Icon name for the theme toggle button
pub fn theme_toggle_icon(is_dark: bool) -> &'static str {
    if is_dark {
        "sunny"
    } else {
        "moon"
    }
}
