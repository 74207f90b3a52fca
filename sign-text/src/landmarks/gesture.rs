use super::{
    Point, HAND_LANDMARKS, INDEX_PIP, INDEX_TIP, MIDDLE_PIP, MIDDLE_TIP, PINKY_PIP, PINKY_TIP,
    RING_PIP, RING_TIP,
};

const EPSILON: f32 = 1e-5;

/// Fraction of the hand height a fingertip must clear its PIP joint by
const Y_MARGIN_RATIO: f32 = 0.12;
/// Fraction of the hand width the index and middle tips must be within
const CLOSE_MARGIN_RATIO: f32 = 0.22;

/// Detect the ASL "H" shape used as an explicit word-boundary signal
///
/// Index and middle fingers extended and held together, ring and pinky
/// folded. Any set that is not exactly 21 points is simply not a gesture.
pub fn is_space_gesture(landmarks: &[Point]) -> bool {
    if landmarks.len() != HAND_LANDMARKS {
        return false;
    }

    let (min_x, max_x, min_y, max_y) = landmarks.iter().fold(
        (f32::MAX, f32::MIN, f32::MAX, f32::MIN),
        |(min_x, max_x, min_y, max_y), p| {
            (min_x.min(p.x), max_x.max(p.x), min_y.min(p.y), max_y.max(p.y))
        },
    );
    let w = (max_x - min_x) + EPSILON;
    let h = (max_y - min_y) + EPSILON;

    let y_margin = Y_MARGIN_RATIO * h;
    let close_margin = CLOSE_MARGIN_RATIO * w;

    let extended = |tip: usize, pip: usize| landmarks[tip].y < landmarks[pip].y - 0.5 * y_margin;
    let folded = |tip: usize, pip: usize| landmarks[tip].y > landmarks[pip].y + 0.35 * y_margin;

    extended(INDEX_TIP, INDEX_PIP)
        && extended(MIDDLE_TIP, MIDDLE_PIP)
        && folded(RING_TIP, RING_PIP)
        && folded(PINKY_TIP, PINKY_PIP)
        && landmarks[INDEX_TIP].distance(&landmarks[MIDDLE_TIP]) < close_margin
}
