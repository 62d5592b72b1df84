use anyhow::ensure;
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use spectrumcore::store::{ColumnMapping, RawRow, RawValue};

/// Typical licensed channel widths in kHz.
const BANDWIDTHS_KHZ: [f64; 6] = [12.5, 25.0, 200.0, 5_000.0, 10_000.0, 30_000.0];

/// Configuration for generating a synthetic licence dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub rows: usize,
    pub seed: u64,
    pub center_latitude: f64,
    pub center_longitude: f64,
    /// Half-width of the scatter box around the centre, in degrees.
    pub spread_deg: f64,
    pub min_frequency_mhz: f64,
    pub max_frequency_mhz: f64,
    /// Distinct centre frequencies to draw from; few channels means many
    /// records end up sharing a tier.
    pub channels: usize,
    /// Emit `Tx_Frequency`/`Rx_Frequency` columns instead of `Frequency` +
    /// `Device_Type`.
    pub split_layout: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            rows: 500,
            seed: 0,
            center_latitude: -28.3,
            center_longitude: 153.5,
            spread_deg: 1.5,
            min_frequency_mhz: 30.0,
            max_frequency_mhz: 40_000.0,
            channels: 64,
            split_layout: false,
        }
    }
}

impl GeneratorConfig {
    fn normalized_channels(&self) -> usize {
        self.channels.max(1)
    }

    fn channel_mhz(&self, index: usize) -> f64 {
        let channels = self.normalized_channels();
        if channels == 1 {
            return self.min_frequency_mhz;
        }
        let step = (self.max_frequency_mhz - self.min_frequency_mhz) / (channels - 1) as f64;
        // Keep to a 12.5 kHz raster so the dataset looks like real assignments.
        ((self.min_frequency_mhz + step * index as f64) * 80.0).round() / 80.0
    }
}

fn jitter(rng: &mut StdRng, spread: f64) -> f64 {
    if spread > 0.0 {
        rng.gen_range(-spread..spread)
    } else {
        0.0
    }
}

pub fn build_rows(config: &GeneratorConfig) -> anyhow::Result<Vec<RawRow>> {
    ensure!(
        config.min_frequency_mhz > 0.0 && config.min_frequency_mhz <= config.max_frequency_mhz,
        "generator frequency range {}..{} MHz is not a positive, ordered band",
        config.min_frequency_mhz,
        config.max_frequency_mhz
    );
    ensure!(
        config.spread_deg.is_finite() && config.spread_deg >= 0.0,
        "generator spread {} must be a finite, non-negative number of degrees",
        config.spread_deg
    );

    let columns = ColumnMapping::default();
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut rows = Vec::with_capacity(config.rows);

    for index in 0..config.rows {
        let latitude =
            (config.center_latitude + jitter(&mut rng, config.spread_deg)).clamp(-90.0, 90.0);
        let longitude =
            (config.center_longitude + jitter(&mut rng, config.spread_deg)).clamp(-180.0, 180.0);
        let channel = rng.gen_range(0..config.normalized_channels());
        let frequency = config.channel_mhz(channel);
        let bandwidth = BANDWIDTHS_KHZ.choose(&mut rng).copied().unwrap_or(25.0);

        let mut row = RawRow::new()
            .with(&columns.latitude, latitude)
            .with(&columns.longitude, longitude)
            .with(&columns.bandwidth_khz, bandwidth)
            .with(&columns.licence_no, format!("{}", 1_000_000 + index / 2))
            .with(&columns.site_id, format!("SITE-{:04}", index % 97));

        if config.split_layout {
            // Duplex pair; roughly a quarter of sites are receive-only.
            let receive = frequency + bandwidth / 1000.0 * 4.0;
            let transmit = if rng.gen_bool(0.25) {
                RawValue::Null
            } else {
                RawValue::Number(frequency)
            };
            row.insert(&columns.tx_frequency, transmit);
            row.insert(&columns.rx_frequency, receive);
        } else {
            let code = if rng.gen_bool(0.5) { "T" } else { "R" };
            row.insert(&columns.device_type, code);
            row.insert(&columns.frequency, frequency);
        }
        rows.push(row);
    }

    Ok(rows)
}
