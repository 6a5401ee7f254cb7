/// Plain per-example gradient descent.
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }

    /// Moves one weight: `w += λ * psi * a`, where `psi` is the destination
    /// node's local error signal and `a` the source node's activation.
    pub fn adjust(&self, weight: &mut f64, psi: f64, activation: f64) {
        *weight += self.learning_rate * psi * activation;
    }
}
