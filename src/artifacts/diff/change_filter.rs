use bitflags::bitflags;

bitflags! {
    /// Which kinds of change a report shows. Letters follow `git diff --diff-filter`:
    /// `M` changed, `A` added, `D` removed.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct ChangeFilter: u32 {
        const CHANGED = 0b001;
        const ADDED = 0b010;
        const REMOVED = 0b100;
    }
}

impl ChangeFilter {
    pub fn try_parse(s: &str) -> anyhow::Result<Self> {
        let mut filter = Self::empty();

        for c in s.chars() {
            match c.to_ascii_uppercase() {
                'M' => filter |= Self::CHANGED,
                'A' => filter |= Self::ADDED,
                'D' => filter |= Self::REMOVED,
                other => {
                    anyhow::bail!("unknown change filter letter {other:?}, expected M, A or D")
                }
            }
        }

        if filter.is_empty() {
            anyhow::bail!("change filter cannot be empty");
        }

        Ok(filter)
    }
}

impl Default for ChangeFilter {
    fn default() -> Self {
        Self::all()
    }
}
