//! Shared fixtures: element sets from the SGP4 verification suite (Vallado et al. 2006).

/// ISS (ZARYA), epoch 2008-09-20.
pub const ISS_NAME: &str = "ISS (ZARYA)";
pub const ISS_LINE1: &str = "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927";
pub const ISS_LINE2: &str = "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537";

/// Vanguard 1 (catalog number 5), eccentric MEO-crossing orbit, epoch 2000-06-27.
pub const VANGUARD_NAME: &str = "VANGUARD 1";
pub const VANGUARD_LINE1: &str =
    "1 00005U 58002B   00179.78495062  .00000023  00000-0  28098-4 0  4753";
pub const VANGUARD_LINE2: &str =
    "2 00005  34.2682 348.7242 1859667 331.7664  19.3264 10.82419157413667";

/// A three-line record that passes the catalog text framing but fails element parsing.
pub const BROKEN_NAME: &str = "BROKEN OBJECT";
pub const BROKEN_LINE1: &str = "1 abcde garbage line that is not a valid element set 0000";
pub const BROKEN_LINE2: &str = "2 abcde equally broken second line 00000";

pub fn catalog_text() -> String {
    format!(
        "{ISS_NAME}\n{ISS_LINE1}\n{ISS_LINE2}\n\
         {VANGUARD_NAME}\n{VANGUARD_LINE1}\n{VANGUARD_LINE2}\n\
         {BROKEN_NAME}\n{BROKEN_LINE1}\n{BROKEN_LINE2}\n"
    )
}
