//! Squared Euclidean norm of a 2-vector at working precision

use num_bigint::BigInt;
use rug::ops::AddAssignRound;
use rug::Float;

use crate::workspace::WorkspaceBuffer;

/// r ← x1² + x2², rounded per the buffer's context
pub fn norm2(r: &mut Float, x1: &BigInt, x2: &BigInt, ws: &WorkspaceBuffer) {
    let ctx = *ws.context();
    let round = ctx.round();
    let mut local = ws.walloc(1);
    let t = &mut local[0];

    ctx.assign_int(r, x1);
    r.square_round(round);
    ctx.assign_int(t, x2);
    t.square_round(round);
    r.add_assign_round(&*t, round);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::precision::{FloatContext, RoundingMode};

    #[test]
    fn test_norm2_exact() {
        let ws = WorkspaceBuffer::new(2, FloatContext::default());
        let mut r = ws.context().zero();

        norm2(&mut r, &BigInt::from(3), &BigInt::from(-4), &ws);
        assert_eq!(r, 25);

        norm2(&mut r, &BigInt::from(0), &BigInt::from(0), &ws);
        assert!(r.is_zero());
        assert_eq!(ws.in_use(), 0);
    }

    #[test]
    fn test_norm2_respects_precision() {
        // (2^40 + 1)^2 = 2^80 + 2^41 + 1 is exact at 128 bits but not at 53
        let x = (BigInt::from(1u8) << 40) + 1;
        let zero = BigInt::from(0);

        let wide = WorkspaceBuffer::new(1, FloatContext::new(128, RoundingMode::Nearest).unwrap());
        let mut r = wide.context().zero();
        norm2(&mut r, &x, &zero, &wide);
        let exact = rug::Integer::from(1) << 80u32;
        let exact = exact + (rug::Integer::from(1) << 41u32) + 1;
        assert_eq!(r, exact);

        let narrow_down = WorkspaceBuffer::new(1, FloatContext::new(53, RoundingMode::Down).unwrap());
        let mut d = narrow_down.context().zero();
        norm2(&mut d, &x, &zero, &narrow_down);
        assert!(d < exact);
        assert_eq!(narrow_down.peak(), 1);
    }
}
