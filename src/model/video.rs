//! Showcase video catalog and selection state

use serde::{Deserialize, Serialize};

/// A promotional video shown in the showcase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub url: String,
    #[serde(default)]
    pub duration_secs: u32,
}

impl Video {
    pub fn formatted_duration(&self) -> String {
        format!("{}:{:02}", self.duration_secs / 60, self.duration_secs % 60)
    }
}

/// Built-in catalog used when the config does not list any videos
pub fn default_catalog() -> Vec<Video> {
    vec![
        Video {
            id: "tour".to_string(),
            title: "Product tour".to_string(),
            description: "A five minute walk through the explorer".to_string(),
            url: "https://videos.example.com/tour.mp4".to_string(),
            duration_secs: 312,
        },
        Video {
            id: "sync".to_string(),
            title: "Sync across devices".to_string(),
            description: "Pair a second device and watch libraries converge".to_string(),
            url: "https://videos.example.com/sync.mp4".to_string(),
            duration_secs: 148,
        },
        Video {
            id: "cloud".to_string(),
            title: "Hosted locations".to_string(),
            description: "Back up a location to managed cloud storage".to_string(),
            url: "https://videos.example.com/cloud.mp4".to_string(),
            duration_secs: 203,
        },
    ]
}

/// Which video, if any, is playing in the overlay
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum VideoSelection {
    #[default]
    None,
    Selected(String),
}

impl VideoSelection {
    pub fn select(&mut self, video_id: &str) {
        *self = VideoSelection::Selected(video_id.to_string());
    }

    pub fn clear(&mut self) {
        *self = VideoSelection::None;
    }

    pub fn selected_id(&self) -> Option<&str> {
        match self {
            VideoSelection::None => None,
            VideoSelection::Selected(id) => Some(id),
        }
    }
}
