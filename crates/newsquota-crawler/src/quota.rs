use newsquota_store::Dataset;

/// Additional rows required per label, in the order labels were requested.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NeedMap(Vec<(String, usize)>);

impl NeedMap {
    pub fn get(&self, label: &str) -> usize {
        self.0
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, n)| *n)
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(l, n)| (l.as_str(), *n))
    }

    /// Labels that still need rows.
    pub fn unmet(&self) -> impl Iterator<Item = (&str, usize)> {
        self.iter().filter(|(_, n)| *n > 0)
    }

    pub fn is_satisfied(&self) -> bool {
        self.unmet().next().is_none()
    }
}

pub fn compute_need(dataset: &Dataset, target: usize, labels: &[String]) -> NeedMap {
    let counts = dataset.label_counts();
    NeedMap(
        labels
            .iter()
            .map(|label| {
                let have = counts.get(label.as_str()).copied().unwrap_or_default();
                (label.clone(), target.saturating_sub(have))
            })
            .collect(),
    )
}
