use aqweather_core::{
    Region, Theme, View,
    display::{ColorTag, EMPTY_TEXT, LOADING_TEXT, ResultPanel},
};
use crossterm::style::{Color, Stylize};

const BAR_WIDTH: usize = 36;

/// Turns a [`View`] into terminal text.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    styled: bool,
}

fn terminal_color(tag: ColorTag) -> Color {
    let (r, g, b) = match tag {
        ColorTag::Blue => (96, 165, 250),
        ColorTag::Orange => (251, 146, 60),
        ColorTag::Red => (220, 38, 38),
        ColorTag::Cyan => (34, 211, 238),
        ColorTag::Green => (74, 222, 128),
        ColorTag::Teal => (13, 148, 136),
        ColorTag::Emerald => (110, 231, 183),
        ColorTag::Lime => (190, 242, 100),
        ColorTag::Sky => (186, 230, 253),
        ColorTag::Pink => (244, 114, 182),
        ColorTag::Rose => (244, 63, 94),
        ColorTag::Gray => (229, 231, 235),
    };
    Color::Rgb { r, g, b }
}

impl Renderer {
    pub fn new(styled: bool) -> Self {
        Self { styled }
    }

    fn paint(&self, text: &str, tag: ColorTag) -> String {
        if self.styled {
            text.with(terminal_color(tag)).to_string()
        } else {
            text.to_string()
        }
    }

    fn strong(&self, text: &str) -> String {
        if self.styled { text.bold().to_string() } else { text.to_string() }
    }

    /// Gradient bar standing in for the page background.
    fn theme_bar(&self, theme: Theme) -> String {
        let (start, end) = theme.gradient();
        let half = BAR_WIDTH / 2;
        format!("{}{}", self.paint(&"━".repeat(half), start), self.paint(&"━".repeat(half), end))
    }

    pub fn loading(&self) -> String {
        self.strong(LOADING_TEXT)
    }

    pub fn render(&self, view: &View) -> String {
        let mut lines = vec![self.theme_bar(view.theme)];

        match &view.region {
            Region::Loading => lines.push(self.loading()),
            Region::Error(message) => {
                lines.push(self.paint(&format!("✗ {message}"), ColorTag::Rose));
            }
            Region::Result(panel) => lines.extend(self.panel_lines(panel)),
            Region::Empty => lines.push(EMPTY_TEXT.to_string()),
        }

        lines.push(self.theme_bar(view.theme));
        lines.join("\n")
    }

    fn panel_lines(&self, panel: &ResultPanel) -> Vec<String> {
        let mut lines = vec![
            self.strong(&panel.location),
            panel.date.clone(),
            String::new(),
            format!("  {}", self.strong(&panel.temperature)),
            format!("  {}", panel.condition),
            String::new(),
            format!("  {:<12} {}", "Humidity", panel.humidity),
            format!("  {:<12} {}", "Wind Speed", panel.wind),
        ];

        if let Some(air) = &panel.air_quality {
            lines.push(format!(
                "  {:<12} {}  {}",
                "Air Quality",
                self.paint(air.label.text, air.label.color),
                air.pm2_5
            ));
            if !air.label.description.is_empty() {
                lines.push(format!("  {:<12} {}", "", air.label.description));
            }
        }

        lines
    }
}
