//! This library computes the properties of the remnant black hole formed in a
//! binary black-hole merger, targeting the large mass ratio regime covered by
//! black hole perturbation theory (BHPT) surrogates.
//!
//! Two complementary prediction paths are provided:
//!
//! * [`RemnantSurrogate`]: evaluates pre-trained Gaussian-process regression
//!   fits of the remnant mass, remnant spin, kick velocity and peak luminosity,
//!   loaded from a serialized fit artifact ([`FitBundle`]). Each prediction
//!   comes with a 1-sigma uncertainty propagated from the fit.
//! * Closed-form expressions from the literature: [`PointParticle`] implements
//!   the test-particle ISCO energy/angular-momentum budget following
//!   Hofmann, Barausse & Rezzolla ([arXiv:1605.01938](https://arxiv.org/abs/1605.01938)),
//!   and [`AnalyticalFits`] the kick fits of Sundararajan, Khanna & Hughes
//!   ([arXiv:1003.0485](https://arxiv.org/abs/1003.0485)) and
//!   Islam, Field & Khanna.
//!
//! Regression backends are abstracted behind the [`GprFit`] trait; the crate
//! does not train models, it only consumes them.

mod algorithm;
mod analytical;
mod errors;
mod point_particle;
mod store;
mod surrogates;
mod transforms;

pub use algorithm::*;
pub use analytical::*;
pub use errors::*;
pub use point_particle::*;
pub use store::*;
pub use surrogates::*;
pub use transforms::*;
