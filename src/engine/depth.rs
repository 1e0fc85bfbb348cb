/// Nearest wall distance per screen column.
///
/// `None` means the column's ray hit nothing. The wall pass overwrites every
/// column each frame before the sprite pass reads any of them.
#[derive(Clone, Debug, Default)]
pub struct DepthBuffer {
    cols: Vec<Option<f32>>,
}

impl DepthBuffer {
    pub fn new(width: usize) -> Self {
        Self {
            cols: vec![None; width],
        }
    }

    /// Forget the previous frame and size for `width` columns.
    pub fn reset(&mut self, width: usize) {
        self.cols.clear();
        self.cols.resize(width, None);
    }

    #[inline(always)]
    pub fn set(&mut self, col: usize, depth: Option<f32>) {
        self.cols[col] = depth;
    }

    #[inline(always)]
    pub fn get(&self, col: usize) -> Option<f32> {
        self.cols.get(col).copied().flatten()
    }

    /// Z-test: may something at `depth` draw over column `col`?
    #[inline(always)]
    pub fn admits(&self, col: usize, depth: f32) -> bool {
        match self.cols.get(col) {
            Some(Some(wall)) => depth < *wall,
            Some(None) => true,
            None => false,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cols.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cols.is_empty()
    }
}
