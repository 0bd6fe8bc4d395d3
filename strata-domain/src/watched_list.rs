//! 变更追踪列表（WatchedList）
//!
//! 在基线集合之上记录新增与移除，供仓储在持久化聚合的子集合时只处理差量。
//!
//! 元素本身不需要实现 `PartialEq`，成员判断全部交给构造时提供的比较谓词，
//! 该谓词必须是等价关系（自反、对称、传递），否则列表语义未定义。
//!
//! 注意 `update` 与 `add` / `remove` 的不对称：后两者会参考构造时的基线，
//! 而 `update` 只与调用前的当前集合做差，多次 `update` 相同内容时第二次差量为空。
//!
use std::fmt;
use std::sync::Arc;

type Comparator<T> = Arc<dyn Fn(&T, &T) -> bool + Send + Sync>;

/// 变更追踪列表
pub struct WatchedList<T> {
    initial: Vec<T>,
    current: Vec<T>,
    new: Vec<T>,
    removed: Vec<T>,
    compare: Comparator<T>,
}

impl<T> WatchedList<T> {
    /// 以初始元素（可为空）与比较谓词构造；基线与当前集合均为初始元素
    pub fn new<F>(initial: Vec<T>, compare: F) -> Self
    where
        T: Clone,
        F: Fn(&T, &T) -> bool + Send + Sync + 'static,
    {
        Self {
            current: initial.clone(),
            initial,
            new: Vec::new(),
            removed: Vec::new(),
            compare: Arc::new(compare),
        }
    }

    /// 空列表
    pub fn empty<F>(compare: F) -> Self
    where
        F: Fn(&T, &T) -> bool + Send + Sync + 'static,
    {
        Self {
            initial: Vec::new(),
            current: Vec::new(),
            new: Vec::new(),
            removed: Vec::new(),
            compare: Arc::new(compare),
        }
    }

    /// 当前元素
    pub fn items(&self) -> &[T] {
        &self.current
    }

    /// 相对基线新增的元素
    pub fn new_items(&self) -> &[T] {
        &self.new
    }

    /// 相对基线移除的元素
    pub fn removed_items(&self) -> &[T] {
        &self.removed
    }

    /// 构造时的基线
    pub fn initial_items(&self) -> &[T] {
        &self.initial
    }

    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.current.iter()
    }

    /// 是否存在未持久化的变更
    pub fn has_changes(&self) -> bool {
        !self.new.is_empty() || !self.removed.is_empty()
    }

    /// 按比较谓词判断是否在当前集合中
    pub fn is_current_item(&self, item: &T) -> bool {
        self.contains_in(&self.current, item)
    }

    /// 对当前元素逐个映射，保持顺序，不修改列表
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Vec<U> {
        self.current.iter().map(f).collect()
    }

    fn contains_in(&self, list: &[T], item: &T) -> bool {
        list.iter().any(|v| (self.compare)(item, v))
    }

    fn is_new_item(&self, item: &T) -> bool {
        self.contains_in(&self.new, item)
    }

    fn is_removed_item(&self, item: &T) -> bool {
        self.contains_in(&self.removed, item)
    }

    fn was_added_initially(&self, item: &T) -> bool {
        self.contains_in(&self.initial, item)
    }

    fn strip(compare: &Comparator<T>, list: &mut Vec<T>, item: &T) {
        list.retain(|v| !compare(item, v));
    }
}

impl<T> WatchedList<T>
where
    T: PartialEq + Clone,
{
    /// 以 `PartialEq` 作为比较谓词
    pub fn from_items(initial: Vec<T>) -> Self {
        Self::new(initial, |a: &T, b: &T| a == b)
    }
}

impl<T: Clone> WatchedList<T> {
    /// 加入元素
    ///
    /// - 若该元素已被标记移除：撤销移除标记（重新出现，不计为新增）；
    /// - 否则若既不在新增集合、也不属于基线：计为新增；
    /// - 不在当前集合时追加到当前集合。
    pub fn add(&mut self, item: T) {
        if self.is_removed_item(&item) {
            Self::strip(&self.compare, &mut self.removed, &item);
        } else if !self.is_new_item(&item) && !self.was_added_initially(&item) {
            self.new.push(item.clone());
        }

        if !self.is_current_item(&item) {
            self.current.push(item);
        }
    }

    /// 移除元素
    ///
    /// 总是从当前集合剔除所有相等元素；若它是本次会话新增的，只撤销新增标记，
    /// 不会出现在移除集合中。
    pub fn remove(&mut self, item: &T) {
        Self::strip(&self.compare, &mut self.current, item);

        if self.is_new_item(item) {
            Self::strip(&self.compare, &mut self.new, item);
            return;
        }

        if !self.is_removed_item(item) {
            self.removed.push(item.clone());
        }
    }

    /// 整体替换：新增/移除只相对替换前的当前集合计算，基线保持不变
    pub fn update(&mut self, items: Vec<T>) {
        let new: Vec<T> = items
            .iter()
            .filter(|a| !self.contains_in(&self.current, *a))
            .cloned()
            .collect();

        let removed: Vec<T> = self
            .current
            .iter()
            .filter(|a| !items.iter().any(|b| (self.compare)(*a, b)))
            .cloned()
            .collect();

        self.current = items;
        self.new = new;
        self.removed = removed;
    }
}

impl<T: Clone> Clone for WatchedList<T> {
    fn clone(&self) -> Self {
        Self {
            initial: self.initial.clone(),
            current: self.current.clone(),
            new: self.new.clone(),
            removed: self.removed.clone(),
            compare: Arc::clone(&self.compare),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for WatchedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatchedList")
            .field("initial", &self.initial)
            .field("current", &self.current)
            .field("new", &self.new)
            .field("removed", &self.removed)
            .finish_non_exhaustive()
    }
}

impl<'a, T> IntoIterator for &'a WatchedList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.current.iter()
    }
}
