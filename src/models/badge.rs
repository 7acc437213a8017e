use serde::Serialize;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    pub key: &'static str,
    pub label: &'static str,
}

/// Every badge an employee can carry, in display order. Keys double as icon names.
pub const BADGES: &[Badge] = &[
    Badge { key: "apple", label: "Mac User" },
    Badge { key: "windows", label: "Windows User" },
    Badge { key: "linux", label: "Linux User" },
    Badge { key: "video-camera", label: "Digital Content Star" },
    Badge { key: "trophy", label: "Employee of the Month" },
    Badge { key: "camera", label: "Photographer" },
    Badge { key: "plane", label: "Frequent Flier" },
    Badge { key: "paperclip", label: "Paperclip Afficionado" },
    Badge { key: "coffee", label: "Coffee Snob" },
    Badge { key: "gamepad", label: "Gamer" },
    Badge { key: "bug", label: "Bugfixer" },
    Badge { key: "umbrella", label: "Seattle Fan" },
];

pub fn is_known(key: &str) -> bool {
    BADGES.iter().any(|b| b.key == key)
}
