/// Iterator adapter yielding typed indices, e.g. `(StreetIdx, &Street)`.
pub struct IndexedIter<I, Idx> {
    inner: std::iter::Enumerate<I>,
    _marker: std::marker::PhantomData<Idx>,
}

pub trait EnumerateIdx<Idx>: Iterator + Sized {
    fn enumerate_idx(self) -> IndexedIter<Self, Idx> {
        IndexedIter {
            inner: self.enumerate(),
            _marker: std::marker::PhantomData,
        }
    }
}

impl<I: Iterator, Idx> EnumerateIdx<Idx> for I {}

impl<I: Iterator, Idx: From<usize>> Iterator for IndexedIter<I, Idx> {
    type Item = (Idx, I::Item);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(i, item)| (Idx::from(i), item))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<I: ExactSizeIterator, Idx: From<usize>> ExactSizeIterator for IndexedIter<I, Idx> {}

#[cfg(test)]
mod tests {
    use crate::problem::street::StreetIdx;

    use super::*;

    #[test]
    fn test_enumerate_idx_yields_typed_indices() {
        let names = ["rue-d-athenes", "rue-d-amsterdam", "rue-de-londres"];
        let indexed = names
            .iter()
            .enumerate_idx()
            .map(|(idx, name): (StreetIdx, _)| (idx.get(), *name))
            .collect::<Vec<_>>();

        assert_eq!(indexed.len(), 3);
        assert_eq!(indexed[2], (2, "rue-de-londres"));
    }
}
