// Headless chart surface: the drawing happens in the host, so handles are bookkeeping only
use crate::application::chart_surface::{ChartSurface, SurfaceHandle};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct HeadlessSurface {
    next_handle: AtomicU64,
    live: AtomicUsize,
}

impl HeadlessSurface {
    #[cfg(test)]
    fn live_handles(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }
}

impl ChartSurface for HeadlessSurface {
    fn acquire(&self) -> SurfaceHandle {
        self.live.fetch_add(1, Ordering::SeqCst);
        SurfaceHandle(self.next_handle.fetch_add(1, Ordering::SeqCst) + 1)
    }

    fn release(&self, handle: SurfaceHandle) {
        let previous = self.live.fetch_sub(1, Ordering::SeqCst);
        if previous == 0 {
            self.live.store(0, Ordering::SeqCst);
            tracing::warn!("Released {:?} with no live handles", handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::chart_surface::SurfaceLease;
    use std::sync::Arc;

    #[test]
    fn test_handles_are_counted() {
        let surface = Arc::new(HeadlessSurface::default());
        let lease = SurfaceLease::acquire(surface.clone());
        assert_eq!(lease.handle(), SurfaceHandle(1));
        assert_eq!(surface.live_handles(), 1);

        drop(lease);
        assert_eq!(surface.live_handles(), 0);
    }
}
