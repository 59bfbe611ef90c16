//! Unit test modules.

mod form_validation_test;
mod store_order_test;
mod workout_metrics_test;
