//! 服务与依赖
//!
//! 协作者（仓储、其他服务）以一个静态类型的依赖包在构造时一次性注入，
//! 之后通过 [`Dependent::deps`] 访问。

/// 持有依赖包的组件
pub trait Dependent {
    type Deps;

    fn deps(&self) -> &Self::Deps;
}

/// 应用服务：持有依赖、可在线程间共享
pub trait Service: Dependent + Send + Sync {}

impl<T> Service for T where T: Dependent + Send + Sync {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counter(AtomicUsize);

    struct CounterDeps {
        counter: Arc<Counter>,
    }

    struct Ping {
        deps: CounterDeps,
    }

    impl Dependent for Ping {
        type Deps = CounterDeps;

        fn deps(&self) -> &CounterDeps {
            &self.deps
        }
    }

    impl Ping {
        fn ping(&self) -> usize {
            self.deps().counter.0.fetch_add(1, Ordering::SeqCst) + 1
        }
    }

    fn assert_service<S: Service>(_: &S) {}

    #[test]
    fn deps_are_reached_through_accessor() {
        let counter = Arc::new(Counter(AtomicUsize::new(0)));
        let ping = Ping {
            deps: CounterDeps {
                counter: Arc::clone(&counter),
            },
        };
        assert_service(&ping);
        assert_eq!(ping.ping(), 1);
        assert_eq!(ping.ping(), 2);
        assert_eq!(counter.0.load(Ordering::SeqCst), 2);
    }
}
