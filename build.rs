use std::cmp::Ordering;
use std::env;

// 4-lane f32 instruction sets this crate has a backend for
#[derive(PartialEq, Eq, Debug)]
struct CpuFeature {
    name: &'static str,
    target_arch: &'static [&'static str],
    cfg_flag: &'static str,
    detected: bool,
}

impl CpuFeature {
    // Lowest number == Highest Priority
    fn priority(&self) -> usize {
        match self.name {
            "neon" => 0,
            "sse" => 1,
            _ => usize::MAX,
        }
    }

    fn features() -> Vec<CpuFeature> {
        vec![
            CpuFeature {
                name: "sse",
                target_arch: &["x86", "x86_64"],
                cfg_flag: "sse",
                detected: false,
            },
            CpuFeature {
                // NEON intrinsics are only stable on AArch64
                name: "neon",
                target_arch: &["aarch64"],
                cfg_flag: "neon",
                detected: false,
            },
        ]
    }
}

impl Ord for CpuFeature {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority().cmp(&other.priority())
    }
}

impl PartialOrd for CpuFeature {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Reads the features of the *target* from cargo, so cross builds pick the
// backend of the machine the binary runs on, not the one it is built on.
struct TargetDetector {
    arch: String,
    features: Vec<String>,
}

impl TargetDetector {
    fn from_env() -> Self {
        let arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();
        let features = env::var("CARGO_CFG_TARGET_FEATURE")
            .unwrap_or_default()
            .split(',')
            .map(|feature| feature.trim().to_string())
            .filter(|feature| !feature.is_empty())
            .collect();

        Self { arch, features }
    }

    fn detect_features(&self, features: &mut [CpuFeature]) {
        for feature in features.iter_mut() {
            feature.detected = feature.target_arch.contains(&self.arch.as_str())
                && self.features.iter().any(|f| f == feature.name);
        }
    }
}

fn apply(features: &mut [CpuFeature]) {
    features.sort();

    // Highest priority detected feature wins, scalar lanes otherwise
    let cfg_flag = features
        .iter()
        .find(|cpu_feature| cpu_feature.detected)
        .map(|cpu_feature| cpu_feature.cfg_flag)
        .unwrap_or("fallback");

    println!("cargo:rustc-cfg={cfg_flag}");

    println!("cargo::rustc-check-cfg=cfg(neon)");
    println!("cargo::rustc-check-cfg=cfg(sse)");
    println!("cargo::rustc-check-cfg=cfg(fallback)");
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let mut features = CpuFeature::features();

    TargetDetector::from_env().detect_features(&mut features);

    apply(&mut features);
}
