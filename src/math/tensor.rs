use std::ops::{Index, IndexMut};

// ---------------------------------------------------------------------------
// LayerBuffers
// ---------------------------------------------------------------------------

/// One numeric value per node, for every layer, stored in a single flat arena.
///
/// Layer `n` occupies `data[offsets[n]..offsets[n + 1]]`, so a layer's width is
/// fixed the moment the buffers are allocated. Indexed by `(layer, node)`.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerBuffers {
    offsets: Vec<usize>,
    data: Vec<f64>,
}

impl LayerBuffers {
    /// Allocates zero-filled buffers, one per entry in `widths`.
    pub fn zeros(widths: &[usize]) -> LayerBuffers {
        let mut offsets = Vec::with_capacity(widths.len() + 1);
        let mut total = 0;
        offsets.push(0);
        for &width in widths {
            total += width;
            offsets.push(total);
        }
        LayerBuffers { offsets, data: vec![0.0; total] }
    }

    pub fn layer_count(&self) -> usize {
        self.offsets.len() - 1
    }

    pub fn width(&self, layer: usize) -> usize {
        self.offsets[layer + 1] - self.offsets[layer]
    }

    pub fn layer(&self, layer: usize) -> &[f64] {
        &self.data[self.offsets[layer]..self.offsets[layer + 1]]
    }

    pub fn layer_mut(&mut self, layer: usize) -> &mut [f64] {
        &mut self.data[self.offsets[layer]..self.offsets[layer + 1]]
    }

    /// Borrows layer `layer - 1` for reading and layer `layer` for writing.
    ///
    /// # Panics
    /// Panics if `layer` is zero.
    pub fn adjacent_mut(&mut self, layer: usize) -> (&[f64], &mut [f64]) {
        assert!(layer > 0, "layer 0 has no left neighbour");
        let (left, right) = self.data.split_at_mut(self.offsets[layer]);
        let prev = &left[self.offsets[layer - 1]..];
        let width = self.offsets[layer + 1] - self.offsets[layer];
        (prev, &mut right[..width])
    }

    pub fn fill(&mut self, value: f64) {
        self.data.iter_mut().for_each(|x| *x = value);
    }
}

impl Index<(usize, usize)> for LayerBuffers {
    type Output = f64;

    fn index(&self, (layer, node): (usize, usize)) -> &f64 {
        &self.layer(layer)[node]
    }
}

impl IndexMut<(usize, usize)> for LayerBuffers {
    fn index_mut(&mut self, (layer, node): (usize, usize)) -> &mut f64 {
        &mut self.layer_mut(layer)[node]
    }
}

// ---------------------------------------------------------------------------
// WeightTensor
// ---------------------------------------------------------------------------

/// The weights between every pair of adjacent layers, indexed `(n, k, j)`.
///
/// - `n`: weight layer, between activation layers `n` and `n + 1`
/// - `k`: source node in layer `n`
/// - `j`: destination node in layer `n + 1`
///
/// Values are stored flat in row-major order with `n` outermost and `j`
/// innermost, which is exactly the order of the on-disk weight stream. Weight
/// layer `n` therefore always holds `widths[n]` rows of `widths[n + 1]` values.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightTensor {
    widths: Vec<usize>,
    offsets: Vec<usize>,
    data: Vec<f64>,
}

impl WeightTensor {
    /// Number of weight slots a network with these layer widths needs.
    pub fn slot_count(widths: &[usize]) -> usize {
        widths.windows(2).map(|pair| pair[0] * pair[1]).sum()
    }

    pub fn zeros(widths: &[usize]) -> WeightTensor {
        WeightTensor::filled(widths, vec![0.0; WeightTensor::slot_count(widths)])
    }

    /// Wraps row-major `values`, or returns `None` if there are not exactly
    /// `slot_count(widths)` of them.
    pub fn from_values(widths: &[usize], values: Vec<f64>) -> Option<WeightTensor> {
        if values.len() != WeightTensor::slot_count(widths) {
            return None;
        }
        Some(WeightTensor::filled(widths, values))
    }

    fn filled(widths: &[usize], data: Vec<f64>) -> WeightTensor {
        let mut offsets = Vec::with_capacity(widths.len());
        let mut total = 0;
        offsets.push(0);
        for pair in widths.windows(2) {
            total += pair[0] * pair[1];
            offsets.push(total);
        }
        WeightTensor { widths: widths.to_vec(), offsets, data }
    }

    /// Layer widths this tensor was shaped for.
    pub fn widths(&self) -> &[usize] {
        &self.widths
    }

    /// Number of weight layers (one fewer than activation layers).
    pub fn layer_count(&self) -> usize {
        self.widths.len().saturating_sub(1)
    }

    /// Row `k` of weight layer `n`: every weight leaving source node `k`.
    pub fn row(&self, n: usize, k: usize) -> &[f64] {
        assert!(k < self.widths[n], "row {k} out of bounds in weight layer {n}");
        let cols = self.widths[n + 1];
        let start = self.offsets[n] + k * cols;
        &self.data[start..start + cols]
    }

    pub fn row_mut(&mut self, n: usize, k: usize) -> &mut [f64] {
        assert!(k < self.widths[n], "row {k} out of bounds in weight layer {n}");
        let cols = self.widths[n + 1];
        let start = self.offsets[n] + k * cols;
        &mut self.data[start..start + cols]
    }

    /// All weights in row-major `(n, k, j)` order.
    pub fn values(&self) -> &[f64] {
        &self.data
    }

    fn slot(&self, n: usize, k: usize, j: usize) -> usize {
        let cols = self.widths[n + 1];
        assert!(k < self.widths[n] && j < cols, "weight index ({n}, {k}, {j}) out of bounds");
        self.offsets[n] + k * cols + j
    }
}

impl Index<(usize, usize, usize)> for WeightTensor {
    type Output = f64;

    fn index(&self, (n, k, j): (usize, usize, usize)) -> &f64 {
        &self.data[self.slot(n, k, j)]
    }
}

impl IndexMut<(usize, usize, usize)> for WeightTensor {
    fn index_mut(&mut self, (n, k, j): (usize, usize, usize)) -> &mut f64 {
        let slot = self.slot(n, k, j);
        &mut self.data[slot]
    }
}
