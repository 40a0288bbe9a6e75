//! The accumulator
//!
//! [`Register`] holds the single signed value every arithmetic opcode works on.
//!
//! # Bounds
//!
//! After `a`, `s` and `m` the value must lie in
//! [`REGISTER_MIN`]..=[`REGISTER_MAX`]. The check runs after the mutation, so a
//! failed operation leaves the offending value in place for the error report.
//! `d` and `p` only ever shrink the magnitude and are not checked.

use crate::interpreter::constants::{REGISTER_MAX, REGISTER_MIN};
use crate::interpreter::errors::ErrorKind;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Register(i32);

impl Register {
    pub fn new() -> Self {
        Register(0)
    }

    pub fn value(self) -> i32 {
        self.0
    }

    pub fn add(&mut self, operand: u8) -> Result<(), ErrorKind> {
        self.0 += operand as i32;
        self.check_bounds()
    }

    pub fn sub(&mut self, operand: u8) -> Result<(), ErrorKind> {
        self.0 -= operand as i32;
        self.check_bounds()
    }

    pub fn mul(&mut self, operand: u8) -> Result<(), ErrorKind> {
        self.0 *= operand as i32;
        self.check_bounds()
    }

    /// Floor division
    pub fn div(&mut self, operand: u8) -> Result<(), ErrorKind> {
        if operand == 0 {
            return Err(ErrorKind::DivisionByZero);
        }
        // The divisor is positive, so euclidean division rounds toward -inf.
        self.0 = self.0.div_euclid(operand as i32);
        Ok(())
    }

    /// Remainder with the sign of the register
    pub fn rem(&mut self, operand: u8) -> Result<(), ErrorKind> {
        if operand == 0 {
            return Err(ErrorKind::DivisionByZero);
        }
        self.0 %= operand as i32;
        Ok(())
    }

    fn check_bounds(&self) -> Result<(), ErrorKind> {
        if (REGISTER_MIN..=REGISTER_MAX).contains(&self.0) {
            Ok(())
        } else {
            Err(ErrorKind::RegisterOutOfBounds(self.0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_sub_within_bounds() {
        let mut r = Register::new();
        r.add(9).unwrap();
        r.sub(4).unwrap();
        assert_eq!(r.value(), 5);
    }

    #[test]
    fn test_upper_bound_is_inclusive() {
        let mut r = Register(120);
        r.add(7).unwrap();
        assert_eq!(r.value(), 127);
        assert_eq!(r.add(1), Err(ErrorKind::RegisterOutOfBounds(128)));
        assert_eq!(r.value(), 128);
    }

    #[test]
    fn test_lower_bound_is_inclusive() {
        let mut r = Register(-120);
        r.sub(7).unwrap();
        assert_eq!(r.value(), -127);
        assert_eq!(r.sub(1), Err(ErrorKind::RegisterOutOfBounds(-128)));
    }

    #[test]
    fn test_mul_out_of_bounds() {
        let mut r = Register(81);
        assert_eq!(r.mul(9), Err(ErrorKind::RegisterOutOfBounds(729)));
        let mut r = Register(-15);
        assert_eq!(r.mul(9), Err(ErrorKind::RegisterOutOfBounds(-135)));
    }

    #[test]
    fn test_div_floors_toward_negative_infinity() {
        let mut r = Register(7);
        r.div(2).unwrap();
        assert_eq!(r.value(), 3);

        let mut r = Register(-7);
        r.div(2).unwrap();
        assert_eq!(r.value(), -4);
    }

    #[test]
    fn test_rem_keeps_sign_of_dividend() {
        let mut r = Register(-7);
        r.rem(2).unwrap();
        assert_eq!(r.value(), -1);

        let mut r = Register(7);
        r.rem(3).unwrap();
        assert_eq!(r.value(), 1);
    }

    #[test]
    fn test_zero_divisor() {
        let mut r = Register(5);
        assert_eq!(r.div(0), Err(ErrorKind::DivisionByZero));
        assert_eq!(r.rem(0), Err(ErrorKind::DivisionByZero));
        assert_eq!(r.value(), 5);
    }
}
