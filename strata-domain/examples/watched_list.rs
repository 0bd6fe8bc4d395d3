//! 变更追踪列表：只持久化差量
use strata_domain::watched_list::WatchedList;

fn print_diff(label: &str, list: &WatchedList<&'static str>) {
    println!(
        "{label:<24} current={:?} new={:?} removed={:?}",
        list.items(),
        list.new_items(),
        list.removed_items()
    );
}

fn main() {
    let mut tags = WatchedList::from_items(vec!["rust", "ddd"]);
    print_diff("loaded", &tags);

    tags.add("events");
    print_diff("add events", &tags);

    tags.remove(&"ddd");
    print_diff("remove ddd", &tags);

    tags.add("ddd");
    print_diff("re-add ddd", &tags);

    tags.add("tmp");
    tags.remove(&"tmp");
    print_diff("add+remove tmp", &tags);

    // update 只与替换前的当前集合做差
    tags.update(vec!["rust", "async"]);
    print_diff("update", &tags);
    tags.update(vec!["rust", "async"]);
    print_diff("update again", &tags);
}
