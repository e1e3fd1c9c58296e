//! Filter-and-aggregate core of the weather dashboard.
//!
//! [`data::loader`] reads a CSV of daily observations into an
//! [`ObservationTable`](data::model::ObservationTable),
//! [`data::filter`] selects rows by city and inclusive date range, and
//! [`data::summary`] averages the selected metrics per city.
//! [`data::pipeline::run`] chains them for one user interaction.

pub mod data;
pub mod error;
pub mod settings;
