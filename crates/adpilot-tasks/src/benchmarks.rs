use adpilot_core::PlatformId;

/// Typical per-platform performance, used wherever a number is needed without
/// asking the backend. CPC is in account currency (VND); rates are percentages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Benchmark {
    pub ctr: f64,
    pub cpc: f64,
    pub conversion_rate: f64,
}

impl Benchmark {
    pub const DEFAULT: Benchmark = Benchmark {
        ctr: 1.0,
        cpc: 3_500.0,
        conversion_rate: 2.0,
    };

    pub fn for_platform(platform: PlatformId) -> Self {
        match platform {
            PlatformId::Facebook => Benchmark {
                ctr: 0.9,
                cpc: 3_500.0,
                conversion_rate: 2.5,
            },
            PlatformId::Google => Benchmark {
                ctr: 3.2,
                cpc: 6_000.0,
                conversion_rate: 4.0,
            },
            PlatformId::Tiktok => Benchmark {
                ctr: 1.0,
                cpc: 2_500.0,
                conversion_rate: 1.5,
            },
            PlatformId::Zalo => Benchmark {
                ctr: 0.6,
                cpc: 2_000.0,
                conversion_rate: 2.0,
            },
        }
    }

    /// Plain average over the given platforms; `DEFAULT` when there are none.
    pub fn blended(platforms: &[PlatformId]) -> Self {
        if platforms.is_empty() {
            return Self::DEFAULT;
        }

        let n = platforms.len() as f64;
        let (ctr, cpc, cvr) = platforms
            .iter()
            .map(|p| Self::for_platform(*p))
            .fold((0.0, 0.0, 0.0), |(ctr, cpc, cvr), b| {
                (ctr + b.ctr, cpc + b.cpc, cvr + b.conversion_rate)
            });

        Benchmark {
            ctr: ctr / n,
            cpc: cpc / n,
            conversion_rate: cvr / n,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blended_average() {
        let blended = Benchmark::blended(&[PlatformId::Facebook, PlatformId::Tiktok]);
        assert!((blended.ctr - 0.95).abs() < 1e-9);
        assert_eq!(blended.cpc, 3_000.0);
        assert_eq!(blended.conversion_rate, 2.0);
    }

    #[test]
    fn test_blended_empty_is_default() {
        assert_eq!(Benchmark::blended(&[]), Benchmark::DEFAULT);
    }
}
