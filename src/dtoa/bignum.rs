//! Fixed-capacity arbitrary-precision unsigned integer used by the exact
//! digit generator. Values are stored as 28-bit "bigits" in u32 chunks so
//! every partial product and carry fits a u64 accumulator. Low-order zero
//! bigits are not stored; they are encoded by `exponent`:
//!
//! ```text
//! value = sum(bigits[i] * 2^(28 * (i + exponent)))
//! ```
//!
//! The capacity covers the largest numbers an IEEE double conversion can
//! produce. Exceeding it is a contract violation, not a runtime condition.

use core::cmp::Ordering;

const BIGIT_SIZE: u32 = 28;
const BIGIT_MASK: u32 = (1 << BIGIT_SIZE) - 1;
const CHUNK_SIZE: u32 = 32;

// Enough for ~3584 significant bits. The worst conversions (10^308 scaled
// denominators, chunked digit extraction) stay below half of this.
const BIGIT_CAPACITY: usize = 128;

#[derive(Clone)]
pub(crate) struct Bignum {
    bigits: [u32; BIGIT_CAPACITY],
    used_digits: usize,
    // Number of hidden low-order zero bigits.
    exponent: usize,
}

impl Bignum {
    pub fn new() -> Self {
        Bignum {
            bigits: [0; BIGIT_CAPACITY],
            used_digits: 0,
            exponent: 0,
        }
    }

    fn ensure_capacity(size: usize) {
        assert!(size <= BIGIT_CAPACITY, "bignum capacity exceeded");
    }

    fn bigit_length(&self) -> usize {
        self.used_digits + self.exponent
    }

    fn is_clamped(&self) -> bool {
        self.used_digits == 0 || self.bigits[self.used_digits - 1] != 0
    }

    fn clamp(&mut self) {
        while self.used_digits > 0 && self.bigits[self.used_digits - 1] == 0 {
            self.used_digits -= 1;
        }
        if self.used_digits == 0 {
            self.exponent = 0;
        }
    }

    fn zero(&mut self) {
        for i in 0..self.used_digits {
            self.bigits[i] = 0;
        }
        self.used_digits = 0;
        self.exponent = 0;
    }

    /// Replaces hidden zero bigits by stored ones until the exponent does
    /// not exceed `other`'s. Required before digit-position-aligned work.
    fn align(&mut self, other: &Bignum) {
        if self.exponent > other.exponent {
            let zero_digits = self.exponent - other.exponent;
            Self::ensure_capacity(self.used_digits + zero_digits);
            let mut i = self.used_digits;
            while i > 0 {
                i -= 1;
                self.bigits[i + zero_digits] = self.bigits[i];
            }
            for bigit in self.bigits.iter_mut().take(zero_digits) {
                *bigit = 0;
            }
            self.used_digits += zero_digits;
            self.exponent -= zero_digits;
        }
    }

    fn bigit_at(&self, index: usize) -> u32 {
        if index >= self.bigit_length() || index < self.exponent {
            return 0;
        }
        self.bigits[index - self.exponent]
    }

    pub fn assign_u16(&mut self, value: u16) {
        self.zero();
        if value == 0 {
            return;
        }
        self.bigits[0] = u32::from(value);
        self.used_digits = 1;
    }

    pub fn assign_u64(&mut self, mut value: u64) {
        self.zero();
        if value == 0 {
            return;
        }
        let needed_bigits = 64 / BIGIT_SIZE as usize + 1;
        for i in 0..needed_bigits {
            self.bigits[i] = (value as u32) & BIGIT_MASK;
            value >>= BIGIT_SIZE;
        }
        self.used_digits = needed_bigits;
        self.clamp();
    }

    pub fn assign_bignum(&mut self, other: &Bignum) {
        self.exponent = other.exponent;
        for i in 0..other.used_digits {
            self.bigits[i] = other.bigits[i];
        }
        for i in other.used_digits..self.used_digits {
            self.bigits[i] = 0;
        }
        self.used_digits = other.used_digits;
    }

    /// Assigns from an ASCII decimal string, consuming up to 19 digits per
    /// step since 2^64 > 10^19.
    pub fn assign_decimal_string(&mut self, value: &str) {
        const MAX_U64_DECIMAL_DIGITS: usize = 19;
        self.zero();
        let mut digits = value.as_bytes();
        while digits.len() >= MAX_U64_DECIMAL_DIGITS {
            let (chunk, rest) = digits.split_at(MAX_U64_DECIMAL_DIGITS);
            digits = rest;
            self.multiply_by_power_of_ten(MAX_U64_DECIMAL_DIGITS);
            self.add_u64(read_u64(chunk));
        }
        self.multiply_by_power_of_ten(digits.len());
        self.add_u64(read_u64(digits));
        self.clamp();
    }

    pub fn assign_hex_string(&mut self, value: &str) {
        self.zero();
        let digits = value.as_bytes();
        let needed_bigits = digits.len() * 4 / BIGIT_SIZE as usize + 1;
        Self::ensure_capacity(needed_bigits);
        let mut string_index = digits.len();
        for i in 0..needed_bigits - 1 {
            // These bigits are guaranteed to be "full".
            let mut current_bigit = 0;
            for j in 0..BIGIT_SIZE / 4 {
                string_index -= 1;
                current_bigit += hex_char_value(digits[string_index]) << (j * 4);
            }
            self.bigits[i] = current_bigit;
        }
        self.used_digits = needed_bigits - 1;
        let mut most_significant_bigit = 0;
        for &digit in &digits[..string_index] {
            most_significant_bigit <<= 4;
            most_significant_bigit += hex_char_value(digit);
        }
        if most_significant_bigit != 0 {
            self.bigits[self.used_digits] = most_significant_bigit;
            self.used_digits += 1;
        }
        self.clamp();
    }

    pub fn assign_power_u16(&mut self, base: u16, power_exponent: usize) {
        debug_assert!(base != 0);
        if power_exponent == 0 {
            self.assign_u16(1);
            return;
        }
        self.zero();
        let mut base = base;
        let mut shifts = 0;
        while base & 1 == 0 {
            base >>= 1;
            shifts += 1;
        }
        let mut bit_size: usize = 0;
        let mut tmp_base = base;
        while tmp_base != 0 {
            tmp_base >>= 1;
            bit_size += 1;
        }
        let final_size = bit_size * power_exponent;
        // 1 extra bigit for the shifting, and one for rounded final_size.
        Self::ensure_capacity(final_size / BIGIT_SIZE as usize + 2);

        // Left to right exponentiation, squaring in a u64 for as long as
        // the accumulator fits 32 bits.
        let mut mask = 1usize;
        while power_exponent >= mask {
            mask <<= 1;
        }
        // The mask now points above the most significant 1-bit of the
        // exponent; drop that first 1-bit, it is covered by the seed value.
        mask >>= 2;
        let mut this_value = u64::from(base);
        let mut delayed_multiplication = false;
        const MAX_32BITS: u64 = 0xFFFF_FFFF;
        while mask != 0 && this_value <= MAX_32BITS {
            this_value *= this_value;
            if power_exponent & mask != 0 {
                let base_bits_mask = !((1u64 << (64 - bit_size)) - 1);
                if this_value & base_bits_mask == 0 {
                    this_value *= u64::from(base);
                } else {
                    delayed_multiplication = true;
                }
            }
            mask >>= 1;
        }
        self.assign_u64(this_value);
        if delayed_multiplication {
            self.multiply_by_u32(u32::from(base));
        }
        while mask != 0 {
            self.square();
            if power_exponent & mask != 0 {
                self.multiply_by_u32(u32::from(base));
            }
            mask >>= 1;
        }
        self.shift_left(shifts * power_exponent);
    }

    pub fn add_u64(&mut self, operand: u64) {
        if operand == 0 {
            return;
        }
        let mut other = Bignum::new();
        other.assign_u64(operand);
        self.add_bignum(&other);
    }

    pub fn add_bignum(&mut self, other: &Bignum) {
        debug_assert!(self.is_clamped());
        debug_assert!(other.is_clamped());
        self.align(other);
        Self::ensure_capacity(1 + self.bigit_length().max(other.bigit_length()) - self.exponent);
        let mut carry = 0;
        let mut bigit_pos = other.exponent - self.exponent;
        for i in 0..other.used_digits {
            let sum = self.bigits[bigit_pos] + other.bigits[i] + carry;
            self.bigits[bigit_pos] = sum & BIGIT_MASK;
            carry = sum >> BIGIT_SIZE;
            bigit_pos += 1;
        }
        while carry != 0 {
            let sum = self.bigits[bigit_pos] + carry;
            self.bigits[bigit_pos] = sum & BIGIT_MASK;
            carry = sum >> BIGIT_SIZE;
            bigit_pos += 1;
        }
        self.used_digits = self.used_digits.max(bigit_pos);
        debug_assert!(self.is_clamped());
    }

    /// Requires `other <= self`.
    pub fn subtract_bignum(&mut self, other: &Bignum) {
        debug_assert!(self.is_clamped());
        debug_assert!(other.is_clamped());
        debug_assert!(Bignum::less_equal(other, self));
        self.align(other);
        let offset = other.exponent - self.exponent;
        let mut borrow = 0;
        let mut i = 0;
        while i < other.used_digits {
            debug_assert!(borrow == 0 || borrow == 1);
            let difference = self.bigits[i + offset]
                .wrapping_sub(other.bigits[i])
                .wrapping_sub(borrow);
            self.bigits[i + offset] = difference & BIGIT_MASK;
            borrow = difference >> (CHUNK_SIZE - 1);
            i += 1;
        }
        while borrow != 0 {
            let difference = self.bigits[i + offset].wrapping_sub(borrow);
            self.bigits[i + offset] = difference & BIGIT_MASK;
            borrow = difference >> (CHUNK_SIZE - 1);
            i += 1;
        }
        self.clamp();
    }

    pub fn shift_left(&mut self, shift_amount: usize) {
        if self.used_digits == 0 {
            return;
        }
        self.exponent += shift_amount / BIGIT_SIZE as usize;
        let local_shift = (shift_amount % BIGIT_SIZE as usize) as u32;
        Self::ensure_capacity(self.used_digits + 1);
        self.bigits_shift_left(local_shift);
    }

    fn bigits_shift_left(&mut self, shift_amount: u32) {
        debug_assert!(shift_amount < BIGIT_SIZE);
        let mut carry = 0;
        for i in 0..self.used_digits {
            let new_carry = self.bigits[i] >> (BIGIT_SIZE - shift_amount);
            self.bigits[i] = ((self.bigits[i] << shift_amount) + carry) & BIGIT_MASK;
            carry = new_carry;
        }
        if carry != 0 {
            self.bigits[self.used_digits] = carry;
            self.used_digits += 1;
        }
    }

    pub fn multiply_by_u32(&mut self, factor: u32) {
        if factor == 1 {
            return;
        }
        if factor == 0 {
            self.zero();
            return;
        }
        if self.used_digits == 0 {
            return;
        }
        // The product of a bigit and the factor is 28 + 32 bits; with the
        // carry it still fits a u64.
        let mut carry: u64 = 0;
        for i in 0..self.used_digits {
            let product = u64::from(factor) * u64::from(self.bigits[i]) + carry;
            self.bigits[i] = (product as u32) & BIGIT_MASK;
            carry = product >> BIGIT_SIZE;
        }
        while carry != 0 {
            Self::ensure_capacity(self.used_digits + 1);
            self.bigits[self.used_digits] = (carry as u32) & BIGIT_MASK;
            self.used_digits += 1;
            carry >>= BIGIT_SIZE;
        }
    }

    pub fn multiply_by_u64(&mut self, factor: u64) {
        if factor == 1 {
            return;
        }
        if factor == 0 {
            self.zero();
            return;
        }
        let low = factor & 0xFFFF_FFFF;
        let high = factor >> 32;
        let mut carry: u64 = 0;
        for i in 0..self.used_digits {
            let product_low = low * u64::from(self.bigits[i]);
            let product_high = high * u64::from(self.bigits[i]);
            let tmp = (carry & u64::from(BIGIT_MASK)) + product_low;
            self.bigits[i] = (tmp as u32) & BIGIT_MASK;
            carry = (carry >> BIGIT_SIZE)
                + (tmp >> BIGIT_SIZE)
                + (product_high << (32 - BIGIT_SIZE));
        }
        while carry != 0 {
            Self::ensure_capacity(self.used_digits + 1);
            self.bigits[self.used_digits] = (carry as u32) & BIGIT_MASK;
            self.used_digits += 1;
            carry >>= BIGIT_SIZE;
        }
    }

    /// Multiplies by 10^exponent via powers of 5 and a binary shift, keeping
    /// every factor within the u32/u64 multiply routines.
    pub fn multiply_by_power_of_ten(&mut self, exponent: usize) {
        const FIVE_27: u64 = 0x6765_c793_fa10_079d;
        const FIVE_13: u32 = 1_220_703_125;
        const FIVE_1_TO_12: [u32; 12] = [
            5, 25, 125, 625, 3125, 15625, 78125, 390625, 1953125, 9765625, 48828125, 244140625,
        ];
        if exponent == 0 {
            return;
        }
        if self.used_digits == 0 {
            return;
        }
        let mut remaining_exponent = exponent;
        while remaining_exponent >= 27 {
            self.multiply_by_u64(FIVE_27);
            remaining_exponent -= 27;
        }
        while remaining_exponent >= 13 {
            self.multiply_by_u32(FIVE_13);
            remaining_exponent -= 13;
        }
        if remaining_exponent > 0 {
            self.multiply_by_u32(FIVE_1_TO_12[remaining_exponent - 1]);
        }
        self.shift_left(exponent);
    }

    pub fn times10(&mut self) {
        self.multiply_by_u32(10);
    }

    /// Comba multiplication: each result column is accumulated separately.
    pub fn square(&mut self) {
        debug_assert!(self.is_clamped());
        let product_length = 2 * self.used_digits;
        Self::ensure_capacity(product_length);
        // The u64 accumulator must be able to sum used_digits products of
        // bigit * bigit; with 28-bit bigits that holds up to 256 digits.
        debug_assert!(self.used_digits < 1 << (2 * (CHUNK_SIZE - BIGIT_SIZE)));

        let mut accumulator: u64 = 0;
        // Move the digits out of the way first.
        let copy_offset = self.used_digits;
        for i in 0..self.used_digits {
            self.bigits[copy_offset + i] = self.bigits[i];
        }
        // Two loops to avoid branching on the column bounds. The sum of the
        // two indices equals the column index in both.
        for i in 0..self.used_digits {
            let mut bigit_index1 = i as isize;
            let mut bigit_index2 = 0usize;
            while bigit_index1 >= 0 {
                let chunk1 = self.bigits[copy_offset + bigit_index1 as usize];
                let chunk2 = self.bigits[copy_offset + bigit_index2];
                accumulator += u64::from(chunk1) * u64::from(chunk2);
                bigit_index1 -= 1;
                bigit_index2 += 1;
            }
            self.bigits[i] = (accumulator as u32) & BIGIT_MASK;
            accumulator >>= BIGIT_SIZE;
        }
        for i in self.used_digits..product_length {
            let mut bigit_index1 = (self.used_digits - 1) as isize;
            let mut bigit_index2 = i - bigit_index1 as usize;
            while bigit_index2 < self.used_digits {
                let chunk1 = self.bigits[copy_offset + bigit_index1 as usize];
                let chunk2 = self.bigits[copy_offset + bigit_index2];
                accumulator += u64::from(chunk1) * u64::from(chunk2);
                bigit_index1 -= 1;
                bigit_index2 += 1;
            }
            // This overwritten bigit is not read again in later columns.
            self.bigits[i] = (accumulator as u32) & BIGIT_MASK;
            accumulator >>= BIGIT_SIZE;
        }
        debug_assert!(accumulator == 0);
        self.used_digits = product_length;
        self.exponent *= 2;
        self.clamp();
    }

    /// Divides self by `other`, returning the quotient and leaving the
    /// remainder in self. The quotient must fit 16 bits; each quotient
    /// digit is estimated from the leading bigits and corrected by cheap
    /// scaled subtractions.
    pub fn divide_modulo_int_bignum(&mut self, other: &Bignum) -> u16 {
        debug_assert!(self.is_clamped());
        debug_assert!(other.is_clamped());
        debug_assert!(other.used_digits > 0);

        // Also covers self == 0.
        if self.bigit_length() < other.bigit_length() {
            return 0;
        }

        self.align(other);

        let mut result: u16 = 0;

        // Remove multiples of the divisor until both lengths match.
        while self.bigit_length() > other.bigit_length() {
            // The divisor's top bigit must be large enough for the leading
            // bigit of self to estimate the quotient contribution.
            debug_assert!(other.bigits[other.used_digits - 1] >= (1 << BIGIT_SIZE) / 16);
            debug_assert!(self.bigits[self.used_digits - 1] < 0x10000);
            result += self.bigits[self.used_digits - 1] as u16;
            self.subtract_times(other, self.bigits[self.used_digits - 1]);
        }

        debug_assert!(self.bigit_length() == other.bigit_length());

        let this_bigit = self.bigits[self.used_digits - 1];
        let other_bigit = other.bigits[other.used_digits - 1];

        if other.used_digits == 1 {
            let quotient = this_bigit / other_bigit;
            self.bigits[self.used_digits - 1] = this_bigit - other_bigit * quotient;
            debug_assert!(quotient < 0x10000);
            result += quotient as u16;
            self.clamp();
            return result;
        }

        let division_estimate = this_bigit / (other_bigit + 1);
        debug_assert!(division_estimate < 0x10000);
        result += division_estimate as u16;
        self.subtract_times(other, division_estimate);

        if u64::from(other_bigit) * u64::from(division_estimate + 1) > u64::from(this_bigit) {
            // No need to even try to subtract.
            return result;
        }

        while Bignum::less_equal(other, self) {
            self.subtract_bignum(other);
            result += 1;
        }
        result
    }

    fn subtract_times(&mut self, other: &Bignum, factor: u32) {
        debug_assert!(self.exponent <= other.exponent);
        if factor < 3 {
            for _ in 0..factor {
                self.subtract_bignum(other);
            }
            return;
        }
        let mut borrow: u32 = 0;
        let exponent_diff = other.exponent - self.exponent;
        for i in 0..other.used_digits {
            let product = u64::from(factor) * u64::from(other.bigits[i]);
            let remove = u64::from(borrow) + product;
            let low = (remove as u32) & BIGIT_MASK;
            let difference = self.bigits[i + exponent_diff].wrapping_sub(low);
            self.bigits[i + exponent_diff] = difference & BIGIT_MASK;
            borrow = (difference >> (CHUNK_SIZE - 1)) + ((remove >> BIGIT_SIZE) as u32);
        }
        for i in other.used_digits + exponent_diff..self.used_digits {
            if borrow == 0 {
                return;
            }
            let difference = self.bigits[i].wrapping_sub(borrow);
            self.bigits[i] = difference & BIGIT_MASK;
            borrow = difference >> (CHUNK_SIZE - 1);
        }
        self.clamp();
    }

    /// Knuth's Algorithm D. Divides self by `other`, overwriting self with
    /// the remainder and returning the least significant 64 bits of the
    /// quotient.
    pub fn div_mod(&mut self, other: &Bignum) -> u64 {
        debug_assert!(self.is_clamped());
        debug_assert!(other.is_clamped());
        debug_assert!(other.used_digits > 0);

        // Also covers self == 0.
        if self.bigit_length() < other.bigit_length() {
            return 0;
        }

        self.align(other);

        // The divisor's hidden zero bigits (encoded by its exponent) need
        // never be materialized: both exponents cancel in the quotient, and
        // the zero digits are skipped in the multiply-subtract loops below.
        let num_zeros_v = other.exponent - self.exponent;
        let m = self.used_digits;
        let n = other.used_digits + num_zeros_v;
        debug_assert!(m >= n);
        debug_assert!(n >= 1);

        // D0. Single digit divisors take a short division.
        if n == 1 {
            debug_assert!(num_zeros_v == 0);
            let den = u64::from(other.bigits[0]);
            let mut q: u64 = 0;
            let mut r: u64 = 0;
            let mut i = m;
            while i > 0 {
                i -= 1;
                let t = (r << BIGIT_SIZE) + u64::from(self.bigits[i]);
                q = (q << BIGIT_SIZE) + t / den;
                r = t % den;
            }
            let exponent = self.exponent;
            self.assign_u64(r);
            if r != 0 {
                self.exponent = exponent;
            }
            return q;
        }

        debug_assert!(n >= 2);

        Self::ensure_capacity(m + 1);
        self.bigits[m] = 0;

        // D1. Normalize: scale both operands by a power of two so the
        // divisor's leading bigit has its top bit set. Only the leading
        // digits of the scaled divisor are ever needed, so they are
        // computed on the fly instead of shifting the whole arrays.
        let mut v1 = other.bigits[other.used_digits - 1];
        let mut v2 = if other.used_digits >= 2 {
            other.bigits[other.used_digits - 2]
        } else {
            // An implicit zero digit, encoded by the exponent.
            0
        };
        let s = v1.leading_zeros() - (32 - BIGIT_SIZE);
        debug_assert!(s < BIGIT_SIZE);
        if s > 0 {
            let v3 = if other.used_digits >= 3 {
                other.bigits[other.used_digits - 3]
            } else {
                0
            };
            v1 = (v1 << s | v2 >> (BIGIT_SIZE - s)) & BIGIT_MASK;
            v2 = (v2 << s | v3 >> (BIGIT_SIZE - s)) & BIGIT_MASK;
        }

        // D2. Each round of D3..D7 divides (u[j] .. u[j+n]) by the divisor
        // to produce a single quotient digit.
        let mut quotient_lower: u64 = 0;
        const BASE: u64 = 1 << BIGIT_SIZE;

        let mut j = m - n;
        loop {
            // D3. Estimate the quotient digit from the top two digits of u
            // and the top digit of v. The estimate is at most two too
            // large, and the v2 test below removes nearly every such case.
            let mut u0 = self.bigits[j + n];
            let mut u1 = self.bigits[j + n - 1];
            let mut u2 = self.bigits[j + n - 2];
            if s > 0 {
                let u3 = if j + n >= 3 { self.bigits[j + n - 3] } else { 0 };
                u0 = (u0 << s | u1 >> (BIGIT_SIZE - s)) & BIGIT_MASK;
                u1 = (u1 << s | u2 >> (BIGIT_SIZE - s)) & BIGIT_MASK;
                u2 = (u2 << s | u3 >> (BIGIT_SIZE - s)) & BIGIT_MASK;
            }

            let num = (u64::from(u0) << BIGIT_SIZE) + u64::from(u1);
            let mut qp = if u0 == v1 { BASE - 1 } else { num / u64::from(v1) };
            if qp * u64::from(v2) > ((num - qp * u64::from(v1)) << BIGIT_SIZE) + u64::from(u2) {
                qp -= 1;
                if qp * u64::from(v2)
                    > ((num - qp * u64::from(v1)) << BIGIT_SIZE) + u64::from(u2)
                {
                    qp -= 1;
                }
            }
            debug_assert!(qp < BASE);

            if qp > 0 {
                // D4. Multiply and subtract, keeping the digits positive by
                // remembering a borrow.
                let mut borrow: u32 = 0;
                for i in num_zeros_v..n {
                    let ui = self.bigits[j + i];
                    let vi = u64::from(other.bigits[i - num_zeros_v]);
                    let p = qp * vi + u64::from(borrow);
                    let r = (p as u32) & BIGIT_MASK;
                    borrow = ((p >> BIGIT_SIZE) as u32) + u32::from(ui < r);
                    self.bigits[j + i] = ui.wrapping_sub(r) & BIGIT_MASK;
                }
                let un = self.bigits[j + n];
                self.bigits[j + n] = un.wrapping_sub(borrow) & BIGIT_MASK;
                let was_negative = un < borrow;

                // D5, D6. If the subtraction went negative, add the divisor
                // back once and decrease the quotient digit. The carry out
                // of the top digit cancels against the earlier borrow.
                if was_negative {
                    qp -= 1;
                    let mut carry: u32 = 0;
                    for i in num_zeros_v..n {
                        let ui = u64::from(self.bigits[j + i]);
                        let vi = u64::from(other.bigits[i - num_zeros_v]);
                        let sum = ui + vi + u64::from(carry);
                        self.bigits[j + i] = (sum as u32) & BIGIT_MASK;
                        carry = (sum >> BIGIT_SIZE) as u32;
                    }
                    let un = u64::from(self.bigits[j + n]);
                    self.bigits[j + n] = ((un + u64::from(carry)) as u32) & BIGIT_MASK;
                }
            }

            debug_assert!(qp < BASE);
            quotient_lower = (quotient_lower << BIGIT_SIZE) + qp;

            // D7. Loop on j.
            if j == 0 {
                break;
            }
            j -= 1;
        }

        // D8. No unnormalization is needed since nothing was scaled.
        self.used_digits = n;
        self.clamp();

        quotient_lower
    }

    pub fn compare(a: &Bignum, b: &Bignum) -> Ordering {
        debug_assert!(a.is_clamped());
        debug_assert!(b.is_clamped());
        let bigit_length_a = a.bigit_length();
        let bigit_length_b = b.bigit_length();
        if bigit_length_a != bigit_length_b {
            return bigit_length_a.cmp(&bigit_length_b);
        }
        let mut i = bigit_length_a;
        let min_exponent = a.exponent.min(b.exponent);
        while i > min_exponent {
            i -= 1;
            let bigit_a = a.bigit_at(i);
            let bigit_b = b.bigit_at(i);
            if bigit_a != bigit_b {
                return bigit_a.cmp(&bigit_b);
            }
        }
        Ordering::Equal
    }

    /// Three-way comparison of `a + b` against `c` without materializing
    /// the sum.
    pub fn plus_compare(a: &Bignum, b: &Bignum, c: &Bignum) -> Ordering {
        debug_assert!(a.is_clamped());
        debug_assert!(b.is_clamped());
        debug_assert!(c.is_clamped());
        if a.bigit_length() < b.bigit_length() {
            return Self::plus_compare(b, a, c);
        }
        if a.bigit_length() + 1 < c.bigit_length() {
            return Ordering::Less;
        }
        if a.bigit_length() > c.bigit_length() {
            return Ordering::Greater;
        }
        // The exponent encodes low zero bigits: if 'a' has more of them
        // than 'b' has digits at all, the sum cannot grow a digit.
        if a.exponent >= b.bigit_length() && a.bigit_length() < c.bigit_length() {
            return Ordering::Less;
        }

        let mut borrow: u64 = 0;
        let min_exponent = a.exponent.min(b.exponent).min(c.exponent);
        let mut i = c.bigit_length();
        while i > min_exponent {
            i -= 1;
            let chunk_a = u64::from(a.bigit_at(i));
            let chunk_b = u64::from(b.bigit_at(i));
            let chunk_c = u64::from(c.bigit_at(i));
            let sum = chunk_a + chunk_b;
            if sum > chunk_c + borrow {
                return Ordering::Greater;
            }
            borrow = chunk_c + borrow - sum;
            if borrow > 1 {
                return Ordering::Less;
            }
            borrow <<= BIGIT_SIZE;
        }
        if borrow == 0 {
            Ordering::Equal
        } else {
            Ordering::Less
        }
    }

    pub fn equal(a: &Bignum, b: &Bignum) -> bool {
        Self::compare(a, b) == Ordering::Equal
    }

    pub fn less_equal(a: &Bignum, b: &Bignum) -> bool {
        Self::compare(a, b) != Ordering::Greater
    }

    pub fn less(a: &Bignum, b: &Bignum) -> bool {
        Self::compare(a, b) == Ordering::Less
    }
}

fn read_u64(digits: &[u8]) -> u64 {
    let mut result = 0;
    for &c in digits {
        debug_assert!(c.is_ascii_digit());
        result = result * 10 + u64::from(c - b'0');
    }
    result
}

fn hex_char_value(c: u8) -> u32 {
    match c {
        b'0'..=b'9' => u32::from(c - b'0'),
        b'a'..=b'f' => 10 + u32::from(c - b'a'),
        _ => {
            debug_assert!(c.is_ascii_uppercase());
            10 + u32::from(c - b'A')
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn from_decimal(s: &str) -> Bignum {
        let mut b = Bignum::new();
        b.assign_decimal_string(s);
        b
    }

    fn from_hex(s: &str) -> Bignum {
        let mut b = Bignum::new();
        b.assign_hex_string(s);
        b
    }

    #[test]
    fn assign_round_trips_between_bases() {
        let mut a = Bignum::new();
        a.assign_u64(0xFFFF_FFFF_FFFF_FFFF);
        assert!(Bignum::equal(&a, &from_hex("FFFFFFFFFFFFFFFF")));
        assert!(Bignum::equal(&a, &from_decimal("18446744073709551615")));

        let mut b = Bignum::new();
        b.assign_u16(1);
        b.shift_left(64);
        assert!(Bignum::equal(&b, &from_decimal("18446744073709551616")));
    }

    #[test]
    fn power_of_ten_multiplication() {
        let mut a = Bignum::new();
        a.assign_u16(1);
        a.multiply_by_power_of_ten(5);
        assert!(Bignum::equal(&a, &from_decimal("100000")));

        // Cross-check the power-of-five decomposition against repeated
        // multiplication by ten.
        let mut b = from_decimal("1234567890123456789");
        b.multiply_by_power_of_ten(40);
        let mut expected = from_decimal("1234567890123456789");
        for _ in 0..40 {
            expected.times10();
        }
        assert!(Bignum::equal(&b, &expected));
    }

    #[test]
    fn power_assignment_matches_repeated_multiplication() {
        let mut a = Bignum::new();
        a.assign_power_u16(10, 16);
        assert!(Bignum::equal(&a, &from_decimal("10000000000000000")));

        let mut b = Bignum::new();
        b.assign_power_u16(5, 30);
        assert!(Bignum::equal(&b, &from_decimal("931322574615478515625")));
    }

    #[test]
    fn square_matches_power() {
        let mut a = Bignum::new();
        a.assign_power_u16(10, 20);
        a.square();
        let mut b = Bignum::new();
        b.assign_power_u16(10, 40);
        assert!(Bignum::equal(&a, &b));
    }

    #[test]
    fn addition_and_subtraction_are_inverse() {
        let mut a = from_decimal("100000000000000000000");
        let b = from_decimal("1");
        a.subtract_bignum(&b);
        assert!(Bignum::equal(&a, &from_decimal("99999999999999999999")));
        a.add_bignum(&b);
        assert!(Bignum::equal(&a, &from_decimal("100000000000000000000")));
    }

    #[test]
    fn plus_compare_avoids_the_sum() {
        let a = from_decimal("12345678901234567890");
        let b = from_decimal("987654321");
        let sum = from_decimal("12345678902222222211");
        assert_eq!(Bignum::plus_compare(&a, &b, &sum), Ordering::Equal);
        let above = from_decimal("12345678902222222212");
        assert_eq!(Bignum::plus_compare(&a, &b, &above), Ordering::Less);
        let below = from_decimal("12345678902222222210");
        assert_eq!(Bignum::plus_compare(&a, &b, &below), Ordering::Greater);
    }

    #[test]
    fn small_quotient_division() {
        let mut a = from_decimal("17");
        let b = from_decimal("4");
        assert_eq!(a.divide_modulo_int_bignum(&b), 4);
        assert!(Bignum::equal(&a, &from_decimal("1")));

        let mut a = from_decimal("17");
        a.multiply_by_power_of_ten(34);
        let mut b = from_decimal("4");
        b.multiply_by_power_of_ten(34);
        assert_eq!(a.divide_modulo_int_bignum(&b), 4);
        let mut rem = from_decimal("1");
        rem.multiply_by_power_of_ten(34);
        assert!(Bignum::equal(&a, &rem));
    }

    #[test]
    fn long_division_with_multi_bigit_divisor() {
        // u = b * 123456789 + 999 for a 40-digit b.
        let mut b = Bignum::new();
        b.assign_power_u16(10, 40);
        let mut u = Bignum::new();
        u.assign_bignum(&b);
        u.multiply_by_u32(123_456_789);
        u.add_u64(999);
        let q = u.div_mod(&b);
        assert_eq!(q, 123_456_789);
        assert!(Bignum::equal(&u, &from_decimal("999")));
    }

    #[test]
    fn long_division_single_digit_divisor() {
        // 10^21 = 97 * 10309278350515463917 + 51
        let mut u = from_decimal("1000000000000000000000");
        let b = from_decimal("97");
        let q = u.div_mod(&b);
        assert_eq!(q, 10_309_278_350_515_463_917);
        assert!(Bignum::equal(&u, &from_decimal("51")));
    }

    #[test]
    fn long_division_needs_correction_step() {
        // Divisor with a maximal leading bigit pattern pushes the trial
        // quotient estimate to its correction path.
        let mut u = from_hex("7FFFFFFFFFFFFFFFFFFFFFFF");
        let v = from_hex("8000000000000001");
        let q = u.div_mod(&v);
        let mut check = Bignum::new();
        check.assign_u64(q);
        check.multiply_by_u64(0x8000_0000_0000_0001);
        check.add_bignum(&u);
        assert!(Bignum::equal(&check, &from_hex("7FFFFFFFFFFFFFFFFFFFFFFF")));
        assert!(Bignum::less(&u, &v));
    }
}
