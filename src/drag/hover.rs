/// Tracks nested enter/leave signals for a drop target. Over-counted leaves
/// clamp at zero.
///
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HoverCounter {
    count: u32,
}

impl HoverCounter {
    pub fn enter(&mut self) -> &mut Self {
        self.count = self.count.saturating_add(1);
        self
    }

    pub fn leave(&mut self) -> &mut Self {
        self.count = self.count.saturating_sub(1);
        self
    }

    pub fn reset(&mut self) -> &mut Self {
        self.count = 0;
        self
    }

    pub fn is_over(&self) -> bool {
        self.count > 0
    }
}
