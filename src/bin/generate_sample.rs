//! Writes a deterministic synthetic clustered-tracks CSV for demos and
//! manual testing: four feature archetypes, three label columns (K-Means
//! complete, DBSCAN with noise points, Hierarchical on a subsample).

fn clamp01(v: f64) -> f64 {
    v.clamp(0.0, 1.0)
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// One cluster archetype: feature means plus the genres it draws from.
struct Archetype {
    danceability: f64,
    energy: f64,
    valence: f64,
    tempo: f64,
    genres: &'static [&'static str],
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let archetypes = [
        // upbeat dance
        Archetype {
            danceability: 0.82,
            energy: 0.85,
            valence: 0.75,
            tempo: 126.0,
            genres: &["dance", "electronic", "pop"],
        },
        // mellow acoustic
        Archetype {
            danceability: 0.45,
            energy: 0.30,
            valence: 0.40,
            tempo: 92.0,
            genres: &["acoustic", "folk", "singer-songwriter"],
        },
        // aggressive
        Archetype {
            danceability: 0.50,
            energy: 0.92,
            valence: 0.35,
            tempo: 150.0,
            genres: &["metal", "punk", "hard rock"],
        },
        // laid-back groove
        Archetype {
            danceability: 0.68,
            energy: 0.55,
            valence: 0.60,
            tempo: 105.0,
            genres: &["jazz", "soul", "r&b", "reggae"],
        },
    ];

    let artists = [
        "The Copper Foxes",
        "Nightjar",
        "Mara Vela",
        "Static Bloom",
        "Low Tide Collective",
        "Juniper Swing",
    ];

    let n_tracks = 240;
    let output_path = "sample_tracks.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");

    writer
        .write_record([
            "name_song",
            "artist",
            "genres",
            "danceability",
            "energy",
            "valence",
            "tempo",
            "cluster",
            "cluster_dbscan",
            "cluster_hc",
        ])
        .expect("Failed to write header");

    for i in 0..n_tracks {
        let archetype_idx = (rng.next_u64() % archetypes.len() as u64) as usize;
        let archetype = &archetypes[archetype_idx];

        let danceability = clamp01(rng.gauss(archetype.danceability, 0.08));
        let energy = clamp01(rng.gauss(archetype.energy, 0.08));
        let valence = clamp01(rng.gauss(archetype.valence, 0.10));
        let tempo = rng.gauss(archetype.tempo, 9.0).clamp(60.0, 190.0);

        // K-Means assigns everything.
        let kmeans = archetype_idx.to_string();

        // DBSCAN calls ~6% of rows noise (empty label).
        let dbscan = if rng.next_f64() < 0.06 {
            String::new()
        } else {
            archetype_idx.to_string()
        };

        // Hierarchical labels were computed on a subsample; ~15% missing.
        let hc = if rng.next_f64() < 0.15 {
            String::new()
        } else {
            archetype_idx.to_string()
        };

        writer
            .write_record([
                format!("Track {i:03}"),
                rng.pick(&artists).to_string(),
                rng.pick(archetype.genres).to_string(),
                format!("{danceability:.3}"),
                format!("{energy:.3}"),
                format!("{valence:.3}"),
                format!("{tempo:.1}"),
                kmeans,
                dbscan,
                hc,
            ])
            .expect("Failed to write record");
    }

    writer.flush().expect("Failed to flush output");
    println!("Wrote {n_tracks} tracks to {output_path}");
}
