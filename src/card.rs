//! Card adapter: a styled container that wires the tilt effect on mount.
//!
//! The adapter owns two small jobs. It carries the card's default style
//! bundle, merged with caller overrides (caller wins per key), and on mount
//! it discovers the tilt-enabled surfaces in its scope and attaches the
//! controller to each exactly once. Mounting is deliberately one-shot:
//! attachment happens when the card appears, never reactively on updates.

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use crate::geometry::Padding;
use crate::registry::TiltRegistry;
use crate::settings::TiltSettings;
use crate::style::Color;
use crate::surface::TiltSurface;

/// The card's visual defaults, rendered by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardStyle {
    pub width: f32,
    pub padding: Padding,
    pub margin: Padding,
    pub background: Color,
    pub corner_radius: f32,
    pub text_color: Color,
    pub font_size: f32,
    pub line_height: f32,
}

impl Default for CardStyle {
    fn default() -> Self {
        Self {
            width: 300.0,
            padding: Padding::all(30.0),
            margin: Padding::all(10.0),
            background: Color::WHITE,
            corner_radius: 4.0,
            text_color: Color::from_hex(0x364962),
            font_size: 16.0,
            line_height: 1.6,
        }
    }
}

impl CardStyle {
    /// Merge overrides over this style; every set override wins.
    pub fn merge(mut self, overrides: &CardStyleOverrides) -> Self {
        if let Some(width) = overrides.width {
            self.width = width;
        }
        if let Some(padding) = overrides.padding {
            self.padding = padding;
        }
        if let Some(margin) = overrides.margin {
            self.margin = margin;
        }
        if let Some(background) = overrides.background {
            self.background = background;
        }
        if let Some(corner_radius) = overrides.corner_radius {
            self.corner_radius = corner_radius;
        }
        if let Some(text_color) = overrides.text_color {
            self.text_color = text_color;
        }
        if let Some(font_size) = overrides.font_size {
            self.font_size = font_size;
        }
        if let Some(line_height) = overrides.line_height {
            self.line_height = line_height;
        }
        self
    }
}

/// Caller-supplied style overrides; unset fields keep the card defaults.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CardStyleOverrides {
    pub width: Option<f32>,
    pub padding: Option<Padding>,
    pub margin: Option<Padding>,
    pub background: Option<Color>,
    pub corner_radius: Option<f32>,
    pub text_color: Option<Color>,
    pub font_size: Option<f32>,
    pub line_height: Option<f32>,
}

impl CardStyleOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn padding(mut self, padding: Padding) -> Self {
        self.padding = Some(padding);
        self
    }

    pub fn margin(mut self, margin: Padding) -> Self {
        self.margin = Some(margin);
        self
    }

    pub fn background(mut self, background: Color) -> Self {
        self.background = Some(background);
        self
    }

    pub fn corner_radius(mut self, corner_radius: f32) -> Self {
        self.corner_radius = Some(corner_radius);
        self
    }

    pub fn text_color(mut self, text_color: Color) -> Self {
        self.text_color = Some(text_color);
        self
    }

    pub fn font_size(mut self, font_size: f32) -> Self {
        self.font_size = Some(font_size);
        self
    }

    pub fn line_height(mut self, line_height: f32) -> Self {
        self.line_height = Some(line_height);
        self
    }
}

/// A tilt-enabled card.
#[derive(Debug, Clone)]
pub struct Card {
    style: CardStyle,
    settings: TiltSettings,
    mounted: bool,
}

impl Card {
    pub fn new() -> Self {
        Self {
            style: CardStyle::default(),
            settings: TiltSettings::default(),
            mounted: false,
        }
    }

    /// Apply style overrides over the defaults.
    pub fn style(mut self, overrides: CardStyleOverrides) -> Self {
        self.style = self.style.merge(&overrides);
        self
    }

    /// Tilt settings used for every surface this card attaches.
    pub fn settings(mut self, settings: TiltSettings) -> Self {
        self.settings = settings;
        self
    }

    /// The merged style bundle for the host to render.
    pub fn computed_style(&self) -> &CardStyle {
        &self.style
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Mount the card: attach the tilt controller to every tilt-enabled
    /// surface in `scope`, exactly once per surface. Runs at most once per
    /// card; later calls are no-ops and return 0.
    pub fn mount<S, I>(&mut self, scope: I, registry: &mut TiltRegistry<S>) -> usize
    where
        S: TiltSurface + 'static,
        I: IntoIterator<Item = Rc<RefCell<S>>>,
    {
        if self.mounted {
            debug!("card already mounted, skipping attach");
            return 0;
        }
        self.mounted = true;
        let flagged = scope
            .into_iter()
            .filter(|surface| surface.borrow().tilt_enabled());
        let attached = registry.attach(flagged, self.settings);
        debug!("card mounted, {attached} surface(s) attached");
        attached
    }
}

impl Default for Card {
    fn default() -> Self {
        Self::new()
    }
}
