use serde::{Deserialize, Serialize};

const PASTEL_PALETTE: [&str; 8] = [
    "#b3e2cd", "#fdcdac", "#cbd5e8", "#f4cae4", "#e6f5c9", "#fff2ae", "#f1e2cc", "#cccccc",
];

const TABLEAU_PALETTE: [&str; 10] = [
    "#4e79a7", "#f28e2c", "#e15759", "#76b7b2", "#59a14f", "#edc949", "#af7aa1", "#ff9da7",
    "#9c755f", "#bab0ab",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub text_color: String,
    pub background: String,
    /// Category colors, cycled when a dataset has more categories.
    pub palette: Vec<String>,
}

impl Theme {
    pub fn pastel() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 10.0,
            text_color: "#1C2430".to_string(),
            background: "#FFFFFF".to_string(),
            palette: PASTEL_PALETTE.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn tableau() -> Self {
        Self {
            font_family: "\"trebuchet ms\", verdana, arial, sans-serif".to_string(),
            font_size: 10.0,
            text_color: "#111111".to_string(),
            background: "#FFFFFF".to_string(),
            palette: TABLEAU_PALETTE.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "pastel" | "default" => Some(Self::pastel()),
            "tableau" => Some(Self::tableau()),
            _ => None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::pastel()
    }
}
