//! Fixed-point trigonometry.
//!
//! Angles are linear over a full turn of [`TRIG_MAX_ANGLE`] (0x10000 = 360
//! degrees). Results are scaled so that 1.0 equals [`TRIG_MAX_RATIO`].

/// One full turn.
pub const TRIG_MAX_ANGLE: i32 = 0x10000;

/// Fixed-point representation of 1.0.
pub const TRIG_MAX_RATIO: i32 = 0xFFFF;

const QUARTER_TURN: i32 = TRIG_MAX_ANGLE / 4;

// sin over a quarter turn in 64 steps, both ends included
const QUARTER_SINE: [i32; 65] = [
    0, 1608, 3216, 4821, 6424, 8022, 9616, 11204, //
    12785, 14359, 15924, 17479, 19024, 20557, 22078, 23586, //
    25079, 26557, 28020, 29465, 30893, 32302, 33692, 35061, //
    36409, 37736, 39039, 40319, 41575, 42806, 44011, 45189, //
    46340, 47464, 48558, 49624, 50659, 51664, 52638, 53580, //
    54490, 55367, 56211, 57021, 57797, 58537, 59243, 59913, //
    60546, 61144, 61704, 62227, 62713, 63161, 63571, 63943, //
    64276, 64570, 64826, 65042, 65219, 65357, 65456, 65515, //
    65535,
];

/// Convert whole degrees to the fixed-point angle scale.
///
/// Any angle is accepted; it is first reduced to `0..360`.
pub const fn deg_to_angle(degrees: i32) -> i32 {
    degrees.rem_euclid(360) * (TRIG_MAX_ANGLE / 8) / 45
}

/// Sine of `angle`, in `-TRIG_MAX_RATIO..=TRIG_MAX_RATIO`.
pub fn sin_lookup(angle: i32) -> i32 {
    let angle = angle.rem_euclid(TRIG_MAX_ANGLE);
    let within = angle % QUARTER_TURN;
    match angle / QUARTER_TURN {
        0 => quarter_sine(within),
        1 => quarter_sine(QUARTER_TURN - within),
        2 => -quarter_sine(within),
        _ => -quarter_sine(QUARTER_TURN - within),
    }
}

/// Cosine of `angle`, in `-TRIG_MAX_RATIO..=TRIG_MAX_RATIO`.
pub fn cos_lookup(angle: i32) -> i32 {
    sin_lookup(angle.wrapping_add(QUARTER_TURN))
}

/// Interpolated table lookup for `0..=QUARTER_TURN`.
fn quarter_sine(within: i32) -> i32 {
    let step = (within >> 8) as usize;
    let frac = within & 0xFF;
    if step + 1 >= QUARTER_SINE.len() {
        return QUARTER_SINE[QUARTER_SINE.len() - 1];
    }
    let lo = QUARTER_SINE[step];
    let hi = QUARTER_SINE[step + 1];
    lo + (hi - lo) * frac / 256
}
