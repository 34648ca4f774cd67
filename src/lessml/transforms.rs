//! Transform pipeline infrastructure
//!
//!     Every step of a translation is a stage implementing [Runnable]. Stages are chained
//!     into a [Transform] with `.then()`; the compiler checks that each stage's input is the
//!     previous stage's output:
//!
//!         Transform::from_fn(Ok)
//!             .then(Tokenization::new(grammar))   // String → Vec<Token>
//!             .then(TreeBuilding::new())          // Vec<Token> → Tree
//!             .then(TemplateExpansion::new())     // Tree → Tree
//!             .then(Desugaring::new())            // Tree → Tree
//!             .then(XmlConversion::new())         // Tree → XmlDocument
//!
//!     The pipelines used by the library entry points and the CLI are pre-built in
//!     [standard], either as `Lazy` statics over the default grammar or from a
//!     [LessmlConfig](crate::lessml::config::LessmlConfig).
//!
//!     Stages fail with [LessmlError](crate::lessml::error::LessmlError) directly, so errors
//!     reach the caller unchanged.

pub mod stages;
pub mod standard;

use crate::lessml::error::Result;

/// Trait for anything that can transform an input to an output
pub trait Runnable<I, O> {
    fn run(&self, input: I) -> Result<O>;
}

/// A composable transformation pipeline from `I` to `O`
pub struct Transform<I, O> {
    run_fn: Box<dyn Fn(I) -> Result<O> + Send + Sync>,
}

impl<I, O> Transform<I, O> {
    /// Create a transform from a function
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(I) -> Result<O> + Send + Sync + 'static,
    {
        Transform {
            run_fn: Box::new(f),
        }
    }

    /// Chains `stage` after this transform
    pub fn then<O2, S>(self, stage: S) -> Transform<I, O2>
    where
        S: Runnable<O, O2> + Send + Sync + 'static,
        I: 'static,
        O: 'static,
        O2: 'static,
    {
        let prev_run = self.run_fn;
        Transform {
            run_fn: Box::new(move |input| {
                let intermediate = prev_run(input)?;
                stage.run(intermediate)
            }),
        }
    }

    /// Chains a pre-built (static) transform after this one
    pub fn then_transform<O2>(self, next: &'static Transform<O, O2>) -> Transform<I, O2>
    where
        I: 'static,
        O: 'static,
        O2: 'static,
    {
        let prev_run = self.run_fn;
        Transform {
            run_fn: Box::new(move |input| {
                let intermediate = prev_run(input)?;
                next.run(intermediate)
            }),
        }
    }

    pub fn run(&self, input: I) -> Result<O> {
        (self.run_fn)(input)
    }
}

impl<I, O> Runnable<I, O> for Transform<I, O>
where
    I: 'static,
    O: 'static,
{
    fn run(&self, input: I) -> Result<O> {
        Transform::run(self, input)
    }
}
