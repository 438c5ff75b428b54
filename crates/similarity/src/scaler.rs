/// Column-wise standardization to zero mean and unit (population) variance.
///
/// Columns with zero variance are only centred.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler<const N: usize> {
    mean: [f64; N],
    scale: [f64; N],
}

impl<const N: usize> StandardScaler<N> {
    pub fn fit(rows: &[[f64; N]]) -> Self {
        let mut mean = [0.0; N];
        let mut scale = [1.0; N];

        if rows.is_empty() {
            return Self { mean, scale };
        }

        let n = rows.len() as f64;
        for col in 0..N {
            let m = rows.iter().map(|row| row[col]).sum::<f64>() / n;
            let var = rows.iter().map(|row| (row[col] - m).powi(2)).sum::<f64>() / n;

            mean[col] = m;
            if var > 0.0 {
                scale[col] = var.sqrt();
            }
        }

        Self { mean, scale }
    }

    pub fn transform(&self, row: &[f64; N]) -> [f64; N] {
        std::array::from_fn(|col| (row[col] - self.mean[col]) / self.scale[col])
    }

    pub fn mean(&self) -> &[f64; N] {
        &self.mean
    }

    pub fn scale(&self) -> &[f64; N] {
        &self.scale
    }
}
