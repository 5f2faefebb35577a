use alloc::vec::Vec;

/// 槽位可复用的稀疏表
///
/// 空槽位为`None`；插入总是占用索引最小的空槽位。
#[derive(Debug, Clone)]
pub struct SlotVec<T>(Vec<Option<T>>);

impl<T> Default for SlotVec<T> {
    fn default() -> Self {
        Self(Vec::default())
    }
}

impl<T> SlotVec<T> {
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// 插入新元素至空槽位，并返回槽位的索引
    ///
    /// 没有空槽位时，槽位数量扩至`(n + 1) * 2`，新槽位均为空。
    pub fn insert(&mut self, element: T) -> usize {
        let index = self.0.iter().position(Option::is_none).unwrap_or_else(|| {
            let len = self.0.len();
            self.0.resize_with((len + 1) * 2, || None);
            len
        });
        self.0[index] = Some(element);
        index
    }

    /// 越界或空槽位均返回`None`
    pub fn remove(&mut self, index: usize) -> Option<T> {
        self.0.get_mut(index)?.take()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.0.get(index)?.as_ref()
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.0.get_mut(index)?.as_mut()
    }

    /// 槽位总数，包括空槽位
    pub fn capacity(&self) -> usize {
        self.0.len()
    }

    /// 已占用的槽位数
    pub fn len(&self) -> usize {
        self.0.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Option::is_none)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|element| (i, element)))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, &mut T)> {
        self.0
            .iter_mut()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_mut().map(|element| (i, element)))
    }

    pub fn clear(&mut self) {
        self.0.clear()
    }
}
