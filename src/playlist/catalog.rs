//! Fixed playlist catalog.

use serde::Serialize;

/// A bookmarked playlist embed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Playlist {
    pub name: &'static str,
    /// Embed URL of the playlist
    pub url: &'static str,
}

/// A named group of playlists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
    pub playlists: &'static [Playlist],
}

impl Category {
    pub fn len(&self) -> usize {
        self.playlists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.playlists.is_empty()
    }
}

const FOCUS_DEEP: [Playlist; 4] = [
    Playlist {
        name: "Focus Flow",
        url: "https://open.spotify.com/embed/playlist/2sZYutAwhMODqCaS0mYj4Z?utm_source=generator",
    },
    Playlist {
        name: "Deep Work",
        url: "https://open.spotify.com/embed/playlist/6zCID88oNjNv9zx6puDHKj?utm_source=generator",
    },
    Playlist {
        name: "Intense Study",
        url: "https://open.spotify.com/embed/playlist/2YC6RDAdPt3J4yD2aJMtjt?utm_source=generator",
    },
    Playlist {
        name: "Brain Food",
        url: "https://open.spotify.com/embed/playlist/3cnkhyqinMpD5O6f6qh5l4?utm_source=generator",
    },
];

const LOFI_DEEP: [Playlist; 4] = [
    Playlist {
        name: "Lofi Beats",
        url: "https://open.spotify.com/embed/playlist/3bZTQGrvewbkJJe6UpTFKc?utm_source=generator",
    },
    Playlist {
        name: "Chill Vibes",
        url: "https://open.spotify.com/embed/playlist/6HuGmDDzcvvcJ88nWrPEoG?utm_source=generator",
    },
    Playlist {
        name: "Lofi Study",
        url: "https://open.spotify.com/embed/playlist/2ESTi09a3yH7gpt7nN4Y4d?utm_source=generator",
    },
    Playlist {
        name: "Night Lofi",
        url: "https://open.spotify.com/embed/playlist/2uDVS1t0HqMnczrWgA1xcJ?utm_source=generator",
    },
];

/// The two playlist categories, in tab order.
pub const CATEGORIES: [Category; 2] = [
    Category {
        id: "focus-deep",
        name: "Focus Deep",
        playlists: &FOCUS_DEEP,
    },
    Category {
        id: "lofi-deep",
        name: "Lofi Deep",
        playlists: &LOFI_DEEP,
    },
];

/// Looks a category up by id.
pub fn find_category(id: &str) -> Option<usize> {
    CATEGORIES.iter().position(|c| c.id == id)
}
