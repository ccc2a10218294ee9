//! Database integration tests.

use super::*;
use crate::error::AppError;
use crate::test_support::{epoch, paste_with_limits, setup_temp_db as setup_test_db};
use chrono::Duration;
use std::sync::{Arc, Barrier};
use std::thread;
