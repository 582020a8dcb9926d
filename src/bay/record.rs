//! Construction records and display summaries
//!
//! A construction record is the compact one-line form unit files use, e.g.
//! `asfbay:12.0:2:5` (tag, capacity, doors, bay id). Infantry bays append
//! their platoon type; couplings carry only a tag and id.

use std::fmt;
use std::str::FromStr;

use crate::bay::kind::BayKind;
use crate::bay::platoon::PlatoonType;
use crate::bay::transport_bay::Bay;
use crate::bay::Transporter;
use crate::core::config::{self, BayRules};
use crate::core::error::{BayError, Result};
use crate::core::types::BayId;

/// Whole numbers keep one decimal so records read `12.0`, not `12`
fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// Summary figures: whole numbers bare, anything else to one decimal
fn format_amount(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{:.0}", rounded)
    } else {
        format!("{:.1}", rounded)
    }
}

fn malformed(record: &str, reason: &str) -> BayError {
    BayError::MalformedRecord(format!("{} ({})", reason, record))
}

fn parse_capacity(field: &str, record: &str) -> Result<f64> {
    field
        .trim()
        .parse::<f64>()
        .map_err(|_| malformed(record, "capacity is not a number"))
}

fn parse_doors(field: &str, record: &str) -> Result<u32> {
    let doors: i64 = field
        .trim()
        .parse()
        .map_err(|_| malformed(record, "door count is not an integer"))?;
    if doors < 0 {
        return Err(BayError::InvalidConfiguration(format!(
            "Door count cannot be negative: {}",
            record
        )));
    }
    u32::try_from(doors).map_err(|_| malformed(record, "door count out of range"))
}

fn parse_id(field: &str, record: &str) -> Result<BayId> {
    field
        .trim()
        .parse::<u32>()
        .map(BayId)
        .map_err(|_| malformed(record, "bay id is not a number"))
}

impl Bay {
    /// Compact construction record
    pub fn to_record(&self) -> String {
        match self.kind {
            BayKind::Coupling(_) => format!("{}:{}", self.kind.tag(), self.id),
            BayKind::Infantry(platoon) => format!(
                "{}:{}:{}:{}:{}",
                self.kind.tag(),
                format_quantity(self.rated_capacity),
                self.doors.total(),
                self.id,
                platoon.as_str()
            ),
            _ => format!(
                "{}:{}:{}:{}",
                self.kind.tag(),
                format_quantity(self.rated_capacity),
                self.doors.total(),
                self.id
            ),
        }
    }

    /// Build a bay from its construction record under the global rules
    pub fn from_record(record: &str) -> Result<Self> {
        Self::from_record_with_rules(record, config::rules())
    }

    pub fn from_record_with_rules(record: &str, rules: &BayRules) -> Result<Self> {
        let record = record.trim();
        let fields: Vec<&str> = record.split(':').collect();
        let tag = fields[0].trim().to_ascii_lowercase();

        match (tag.as_str(), fields.len()) {
            ("dockingcollar" | "trailerhitch", 2) => {
                let kind = BayKind::from_tag(&tag, None)
                    .ok_or_else(|| malformed(record, "unknown bay tag"))?;
                let id = parse_id(fields[1], record)?;
                Bay::with_rules(kind, 1.0, 1, id, rules)
            }
            ("infantrybay", 5) => {
                let platoon: PlatoonType = fields[4].parse()?;
                let capacity = parse_capacity(fields[1], record)?;
                let doors = parse_doors(fields[2], record)?;
                let id = parse_id(fields[3], record)?;
                Bay::with_rules(BayKind::Infantry(platoon), capacity, doors, id, rules)
            }
            (_, 4) => {
                let kind = BayKind::from_tag(&tag, None)
                    .filter(|k| !k.is_coupling())
                    .ok_or_else(|| malformed(record, "unknown bay tag"))?;
                let capacity = parse_capacity(fields[1], record)?;
                let doors = parse_doors(fields[2], record)?;
                let id = parse_id(fields[3], record)?;
                Bay::with_rules(kind, capacity, doors, id, rules)
            }
            _ => Err(malformed(record, "wrong number of fields")),
        }
    }
}

impl FromStr for Bay {
    type Err = BayError;

    fn from_str(s: &str) -> Result<Self> {
        Bay::from_record(s)
    }
}

impl fmt::Display for Bay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.kind.display_name();

        if self.kind.is_coupling() {
            let state = if self.doors_available() == 0 {
                "damaged"
            } else if self.loaded.is_empty() {
                "free"
            } else {
                "occupied"
            };
            return write!(f, "{} - {}", name, state);
        }

        let doors = self.doors_available();
        write!(
            f,
            "{} ({} door{}) - {} {}",
            name,
            doors,
            if doors == 1 { "" } else { "s" },
            format_amount(self.unused_in_units()),
            self.kind.capacity_label()
        )?;
        if let Some(pool) = self.recovery_pool() {
            write!(f, " ({} recovery open)", pool.available_count())?;
        }
        Ok(())
    }
}
