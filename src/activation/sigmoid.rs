use std::f64::consts::E;

/// The logistic sigmoid, the network's only threshold function.
pub struct Sigmoid;

impl Sigmoid {
    /// `1 / (1 + e^-x)`
    pub fn function(x: f64) -> f64 {
        1.0 / (1.0 + E.powf(-x))
    }

    /// Derivative evaluated at the pre-activation value `x`.
    ///
    /// Re-evaluates the sigmoid instead of reading a cached activation, so the
    /// backward pass only ever needs `theta`.
    pub fn derivative(x: f64) -> f64 {
        let fx = Sigmoid::function(x);
        fx * (1.0 - fx)
    }
}
