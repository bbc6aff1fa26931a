//! bugtracker-tracking – Bug-Lebenszyklus und Aktivitaetslog
//!
//! Kernregel: jeder tatsaechliche Status-Wechsel eines Bugs erzeugt genau
//! einen Aktivitaetseintrag. Lesepfade erzeugen nie Eintraege.

pub mod activity;
pub mod bugs;
pub mod error;
pub mod stats;

pub use activity::{AktivitaetAufgeloest, AktivitaetsLog, STANDARD_LIMIT};
pub use bugs::{BugDienst, BugMitMelder, NeuerBugEingabe, UNBEKANNTER_MELDER};
pub use error::{TrackingError, TrackingResult};
pub use stats::{Statistik, StatistikDienst};
