//! Behaviour every [`crate::Discipline`] is checked against. Each discipline crate runs the
//! suite from its own test module.

#[cfg(test)]
pub(crate) mod recorder;
