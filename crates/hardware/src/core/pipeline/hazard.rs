//! Hazard Detection.
//!
//! Pairwise dependency checks between packets resident in the pipeline.
//! Detection is an observation; whether a hazard stalls anything is the
//! model's decision, driven by the forwarding configuration.

use super::packet::InstructionPacket;

/// The kinds of hazard the model records.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HazardKind {
    /// Read-after-write data dependency.
    RawData,
    /// Write-after-write data dependency.
    WawData,
    /// Write-after-read data dependency.
    WarData,
    /// Control transfer in flight.
    Control,
    /// Resource conflict (issue into an occupied slot).
    Structural,
}

impl HazardKind {
    /// Returns the display name of the hazard kind.
    pub fn name(self) -> &'static str {
        match self {
            HazardKind::RawData => "DATA_RAW",
            HazardKind::WawData => "DATA_WAW",
            HazardKind::WarData => "DATA_WAR",
            HazardKind::Control => "CONTROL",
            HazardKind::Structural => "STRUCTURAL",
        }
    }
}

/// Checks `current` against an older in-flight packet.
///
/// RAW takes precedence over WAW, which takes precedence over WAR, matching
/// the severity order an in-order pipeline cares about. Register 0 is the
/// "no operand" marker, so it never participates.
///
/// # Arguments
///
/// * `current` - The younger packet, in decode.
/// * `prior` - An older packet in a deeper stage.
///
/// # Returns
///
/// The most severe data hazard between the pair, if any.
pub fn data_hazard(current: &InstructionPacket, prior: &InstructionPacket) -> Option<HazardKind> {
    if prior.dest_reg != 0
        && (current.src_reg1 == prior.dest_reg || current.src_reg2 == prior.dest_reg)
    {
        return Some(HazardKind::RawData);
    }

    if current.dest_reg != 0 && current.dest_reg == prior.dest_reg {
        return Some(HazardKind::WawData);
    }

    if current.dest_reg != 0
        && (prior.src_reg1 == current.dest_reg || prior.src_reg2 == current.dest_reg)
    {
        return Some(HazardKind::WarData);
    }

    None
}
