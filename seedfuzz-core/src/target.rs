//! Target operations.
//!
//! A fuzz harness drives exactly one [`TargetOperation`]. What the target
//! computes is its own business: the harness only cares that `invoke`
//! returns control instead of panicking.

use std::fmt;

/// Normal return of a target operation.
///
/// Both variants count as a completed trial. The distinction is kept only
/// for campaign statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// The target processed the input.
    Accepted,
    /// The target validated the input and refused it without faulting.
    Rejected(String),
}

impl Invocation {
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected(reason.into())
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

impl<T, E: fmt::Display> From<std::result::Result<T, E>> for Invocation {
    fn from(result: std::result::Result<T, E>) -> Self {
        match result {
            Ok(_) => Self::Accepted,
            Err(e) => Self::Rejected(e.to_string()),
        }
    }
}

/// Operation under test.
///
/// Implementations must be thread-safe (`Send + Sync`) because trials may
/// run on several workers at once, and must not carry mutable state from
/// one trial to the next.
pub trait TargetOperation: Send + Sync {
    /// Run the operation on one candidate input.
    ///
    /// `None` is the absent sequence, `Some(&[])` the empty one.
    fn invoke(&self, input: Option<&[u8]>) -> Invocation;
}

/// Adapter turning a closure into a [`TargetOperation`].
pub struct FnTarget<F> {
    func: F,
}

impl<F> FnTarget<F>
where
    F: Fn(Option<&[u8]>) -> Invocation + Send + Sync,
{
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> TargetOperation for FnTarget<F>
where
    F: Fn(Option<&[u8]>) -> Invocation + Send + Sync,
{
    fn invoke(&self, input: Option<&[u8]>) -> Invocation {
        (self.func)(input)
    }
}

impl<F> fmt::Debug for FnTarget<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnTarget").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fn_target_forwards_input() {
        let target = FnTarget::new(|input: Option<&[u8]>| match input {
            None => Invocation::rejected("absent"),
            Some(_) => Invocation::Accepted,
        });

        assert_eq!(target.invoke(None), Invocation::rejected("absent"));
        assert!(target.invoke(Some(b"x")).is_accepted());
    }

    #[test]
    fn test_invocation_from_result() {
        let ok: Result<u8, String> = Ok(1);
        let err: Result<u8, String> = Err("bad header".into());

        assert_eq!(Invocation::from(ok), Invocation::Accepted);
        assert_eq!(
            Invocation::from(err),
            Invocation::Rejected("bad header".into())
        );
    }
}
