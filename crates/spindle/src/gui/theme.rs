use gdk4 as gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

pub struct ThemeColors {
    pub logo: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            logo: Self::lookup_color(
                context,
                "spindle_logo_color",
                Srgba::new(0.380, 0.855, 0.984, 1.0),
                None,
            ),
        }
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                let (r, g, b, a) = (
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                );
                Srgba::new(r, g, b, alpha_override.unwrap_or(a))
            })
            .unwrap_or(fallback)
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
@define-color spindle_logo_color #61dafb;

.spindle-window {
    background-color: #242424;
}
.spindle-canvas {
    background: none;
}
.spindle-readout {
    font-size: 24px;
    color: rgba(255, 255, 255, 0.87);
    transition: opacity 200ms ease;
}
.spindle-sidebar {
    background-color: #ffffff;
    color: #213547;
    padding: 32px 16px;
    box-shadow: 2px 0 10px rgba(0, 0, 0, 0.2);
}
.spindle-sidebar label {
    color: #213547;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
