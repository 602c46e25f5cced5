use super::*;

pub mod v1beta1;
