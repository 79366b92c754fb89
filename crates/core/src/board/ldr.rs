// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

/// GL5528-style photoresistor in a voltage divider feeding a 10-bit ADC.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LdrCircuit {
    /// LDR resistance at 10 lux, in ohms.
    pub r10lx: f64,
    pub gamma: f64,
    /// Fixed divider resistor, in ohms.
    pub r1: f64,
    pub vcc: f64,
    pub adc_bits: u32,
}

impl Default for LdrCircuit {
    fn default() -> Self {
        Self {
            r10lx: 15_000.0,
            gamma: 0.6,
            r1: 5_000.0,
            vcc: 5.0,
            adc_bits: 10,
        }
    }
}

impl LdrCircuit {
    pub fn resistance(&self, lux: f64) -> f64 {
        10f64.powf(self.gamma) * self.r10lx / lux.powf(self.gamma)
    }

    pub fn voltage(&self, lux: f64) -> f64 {
        (self.vcc * self.r1) / (self.resistance(lux) + self.r1)
    }

    /// ADC count for `lux`. Lux must be positive.
    pub fn adc_reading(&self, lux: f64) -> u16 {
        let full_scale = (1u32 << self.adc_bits) as f64;
        let max_count = full_scale - 1.0;
        let count = (self.voltage(lux) / self.vcc * full_scale).floor();
        count.clamp(0.0, max_count) as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_points() {
        let ldr = LdrCircuit::default();
        for (lux, expected) in [
            (1.0, 79),
            (100.0, 583),
            (1000.0, 861),
            (10_000.0, 977),
            (100_000.0, 1011),
        ] {
            assert_eq!(ldr.adc_reading(lux), expected, "lux {lux}");
        }
    }

    #[test]
    fn test_resistance_at_reference_lux() {
        let ldr = LdrCircuit::default();
        assert!((ldr.resistance(10.0) - 15_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_monotonic_and_bounded() {
        let ldr = LdrCircuit::default();
        let mut last = 0;
        for lux in [0.01, 0.5, 3.0, 50.0, 700.0, 20_000.0, 100_000.0] {
            let reading = ldr.adc_reading(lux);
            assert!(reading >= last);
            assert!(reading <= 1023);
            last = reading;
        }
    }
}
