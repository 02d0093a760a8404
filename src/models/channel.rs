use std::fmt;

/// Which intensity layer a histogram was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
    Grayscale,
    Equalized,
    Filtered,
}

impl Channel {
    /// Channels plotted on every page, in display order.
    pub const PAGE_ORDER: [Channel; 5] = [
        Channel::Red,
        Channel::Green,
        Channel::Blue,
        Channel::Grayscale,
        Channel::Equalized,
    ];

    /// Key used in the `channel_colors` config map.
    pub fn key(self) -> &'static str {
        match self {
            Channel::Red => "red",
            Channel::Green => "green",
            Channel::Blue => "blue",
            Channel::Grayscale => "grayscale",
            Channel::Equalized => "equalized",
            Channel::Filtered => "filtered",
        }
    }

    pub fn default_color(self) -> &'static str {
        match self {
            Channel::Red => "red",
            Channel::Green => "green",
            Channel::Blue => "blue",
            Channel::Grayscale => "gray",
            Channel::Equalized | Channel::Filtered => "black",
        }
    }

    /// Short name for chart legends.
    pub fn label(self) -> &'static str {
        match self {
            Channel::Red => "Red",
            Channel::Green => "Green",
            Channel::Blue => "Blue",
            Channel::Grayscale => "Grayscale",
            Channel::Equalized => "Equalized",
            Channel::Filtered => "Filtered",
        }
    }

    /// Plot title.
    pub fn title(self) -> &'static str {
        match self {
            Channel::Red => "Red Channel Histogram",
            Channel::Green => "Green Channel Histogram",
            Channel::Blue => "Blue Channel Histogram",
            Channel::Grayscale => "Grayscale Histogram",
            Channel::Equalized => "Equalized Histogram",
            Channel::Filtered => "Filtered Histogram",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
