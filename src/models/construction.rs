// src/models/construction.rs

use crate::config::parameters::ConstructionParameters;

/// センサ両端の余白 (センサ長に対する比)
pub const END_MARGIN_RATIO: f64 = 0.06;

/// 積層断面の総厚 (mm)
///
/// ハウジング2枚、圧電層、層間の接触板 (層数+1)、各層両側の絶縁層の和。
pub fn total_stack_thickness(construction: &ConstructionParameters) -> f64 {
    let layers = construction.piezo_layers as f64;
    2.0 * construction.housing_thickness
        + 2.0 * layers
        + (layers + 1.0) * construction.contact_plate_thickness
        + 2.0 * layers * construction.insulator_thickness
}

/// 素子を配置できる有効長 (m)
pub fn usable_length(length: f64) -> f64 {
    length - 2.0 * length * END_MARGIN_RATIO
}

/// 素子の中心位置 (センサ端からの距離, m)
///
/// 両端の余白を除いた有効長に等間隔で並べる。素子が1個のときは中央に置く。
pub fn element_positions(length: f64, count: u32) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![length / 2.0],
        _ => {
            let margin = length * END_MARGIN_RATIO;
            let usable = usable_length(length);
            (0..count)
                .map(|i| margin + (i as f64 / (count - 1) as f64) * usable)
                .collect()
        }
    }
}

/// 指定された素子間隔 (m)
pub fn element_gap(length: f64, construction: &ConstructionParameters) -> f64 {
    construction.element_spacing / 100.0 * usable_length(length)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_total_stack_thickness_default() {
        let c = ConstructionParameters::default();
        // 2×3.0 + 2×3 + 4×0.5 + 2×3×0.2 = 6 + 6 + 2 + 1.2
        assert!((total_stack_thickness(&c) - 15.2).abs() < 1e-12);
    }

    #[test]
    fn test_element_positions_evenly_spaced() {
        let positions = element_positions(2.0, 5);
        assert_eq!(positions.len(), 5);
        assert!((positions[0] - 0.12).abs() < 1e-12);
        assert!((positions[4] - 1.88).abs() < 1e-12);

        let step = positions[1] - positions[0];
        for pair in positions.windows(2) {
            assert!((pair[1] - pair[0] - step).abs() < 1e-12);
        }
    }

    #[test]
    fn test_single_element_is_centered() {
        assert_eq!(element_positions(2.0, 1), vec![1.0]);
        assert!(element_positions(2.0, 0).is_empty());
    }

    #[test]
    fn test_element_gap() {
        let c = ConstructionParameters {
            element_spacing: 25.0,
            ..ConstructionParameters::default()
        };
        assert!((element_gap(2.0, &c) - 0.44).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn prop_stack_thickness_increases_in_every_input(
            h in 0.1f64..10.0,
            n in 1u32..20,
            p in 0.1f64..5.0,
            i in 0.1f64..5.0,
            dh in 0.01f64..1.0,
        ) {
            let base = ConstructionParameters {
                housing_thickness: h,
                piezo_layers: n,
                contact_plate_thickness: p,
                insulator_thickness: i,
                ..ConstructionParameters::default()
            };
            let t = total_stack_thickness(&base);

            let thicker_housing = ConstructionParameters { housing_thickness: h + dh, ..base.clone() };
            let more_layers = ConstructionParameters { piezo_layers: n + 1, ..base.clone() };
            let thicker_plate = ConstructionParameters { contact_plate_thickness: p + dh, ..base.clone() };
            let thicker_insulator = ConstructionParameters { insulator_thickness: i + dh, ..base.clone() };

            prop_assert!(total_stack_thickness(&thicker_housing) > t);
            prop_assert!(total_stack_thickness(&more_layers) > t);
            prop_assert!(total_stack_thickness(&thicker_plate) > t);
            prop_assert!(total_stack_thickness(&thicker_insulator) > t);
        }
    }
}
