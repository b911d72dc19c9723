pub const DEFAULT_STEP: f32 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Hovered,
    Clicked,
}

/// A state drawn on top of the base layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Highlight<'a> {
    pub state: &'a str,
    pub mark: Mark,
    pub intensity: f32,
}

/// Hover and click tracking for the map canvas.
///
/// Hovering and clicking are independent: the pointer may hover one state
/// while another stays clicked. `progress` eases the hovered state in while
/// the pointer rests on it and back out after the pointer leaves the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Interaction {
    hovered: Option<String>,
    clicked: Option<String>,
    progress: f32,
    pointer_inside: bool,
    step: f32,
}

impl Default for Interaction {
    fn default() -> Self {
        Self::new(DEFAULT_STEP)
    }
}

impl Interaction {
    pub fn new(step: f32) -> Self {
        Self {
            hovered: None,
            clicked: None,
            progress: 0.0,
            pointer_inside: false,
            step,
        }
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    pub fn clicked(&self) -> Option<&str> {
        self.clicked.as_deref()
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn is_pointer_inside(&self) -> bool {
        self.pointer_inside
    }

    /// `target` is the state under the pointer, if any.
    /// Returns `true` when the hovered state changed.
    pub fn pointer_moved(&mut self, target: Option<&str>) -> bool {
        self.pointer_inside = true;

        if self.hovered.as_deref() == target {
            return false;
        }

        self.hovered = target.map(str::to_string);
        self.progress = 0.0;
        true
    }

    pub fn pointer_left(&mut self) {
        self.pointer_inside = false;
    }

    /// A press over no state clears the clicked state.
    /// Returns `true` when the clicked state changed.
    pub fn pressed(&mut self, target: Option<&str>) -> bool {
        if self.clicked.as_deref() == target {
            return false;
        }

        self.clicked = target.map(str::to_string);
        true
    }

    /// Advances the hover animation by one frame.
    pub fn tick(&mut self) {
        if self.hovered.is_none() {
            self.progress = 0.0;
            return;
        }

        if self.pointer_inside {
            self.progress = (self.progress + self.step).min(1.0);
        } else if self.progress > 0.0 {
            self.progress = (self.progress - self.step).max(0.0);
        } else {
            self.hovered = None;
        }
    }

    /// Whether frame ticks are still needed.
    pub fn is_animating(&self) -> bool {
        match self.hovered {
            None => false,
            Some(_) if self.pointer_inside => self.progress < 1.0,
            Some(_) => true,
        }
    }

    /// Emphasis for `state`: the hover progress if it is hovered, zero otherwise.
    pub fn intensity_for(&self, state: &str) -> f32 {
        if self.hovered.as_deref() == Some(state) {
            self.progress
        } else {
            0.0
        }
    }

    /// Overlays in paint order. A state both hovered and clicked is drawn once,
    /// as clicked, with the hover emphasis.
    pub fn highlights(&self) -> Vec<Highlight<'_>> {
        let mut highlights = Vec::with_capacity(2);

        if let Some(hovered) = self.hovered.as_deref() {
            if self.clicked.as_deref() != Some(hovered) {
                highlights.push(Highlight {
                    state: hovered,
                    mark: Mark::Hovered,
                    intensity: self.progress,
                });
            }
        }

        if let Some(clicked) = self.clicked.as_deref() {
            highlights.push(Highlight {
                state: clicked,
                mark: Mark::Clicked,
                intensity: self.intensity_for(clicked),
            });
        }

        highlights
    }
}
