use crate::Property;

/// Position in a listing's image slideshow.
///
/// Navigation wraps in both directions. With no images the index stays at
/// zero and the placeholder image is shown instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageGallery {
    index: usize,
}

impl ImageGallery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn next(self, len: usize) -> Self {
        if len == 0 {
            return self;
        }
        Self {
            index: (self.index + 1) % len,
        }
    }

    pub fn previous(self, len: usize) -> Self {
        if len == 0 {
            return self;
        }
        Self {
            index: (self.index % len + len - 1) % len,
        }
    }

    /// Next/previous controls are only useful with two or more images.
    pub fn has_controls(len: usize) -> bool {
        len >= 2
    }

    pub fn current_url(&self, property: &Property) -> String {
        property.image_url(self.index)
    }
}
