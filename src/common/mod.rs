pub mod date_utils;
pub mod datetime_utils;

use std::result;
use crate::error::Error;

pub type Result<T, E = Error> = result::Result<T, E>;
