// Chart surface trait - the drawing backend the chart model leases while attached
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceHandle(pub u64);

/// Concrete charting backends live outside the core. The component only needs
/// to acquire one drawing resource on attach and give it back on detach.
pub trait ChartSurface: Send + Sync {
    fn acquire(&self) -> SurfaceHandle;

    fn release(&self, handle: SurfaceHandle);
}

/// Scoped ownership of a surface handle. Dropping the lease releases it.
pub struct SurfaceLease {
    surface: Arc<dyn ChartSurface>,
    handle: SurfaceHandle,
}

impl SurfaceLease {
    pub fn acquire(surface: Arc<dyn ChartSurface>) -> Self {
        let handle = surface.acquire();
        tracing::debug!("Acquired chart surface {:?}", handle);
        Self { surface, handle }
    }

    pub fn handle(&self) -> SurfaceHandle {
        self.handle
    }
}

impl Drop for SurfaceLease {
    fn drop(&mut self) {
        tracing::debug!("Releasing chart surface {:?}", self.handle);
        self.surface.release(self.handle);
    }
}

impl std::fmt::Debug for SurfaceLease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurfaceLease")
            .field("handle", &self.handle)
            .finish()
    }
}


#[cfg(test)]
mod tests {
    use super::testing::CountingSurface;
    use super::*;

    #[test]
    fn test_lease_releases_on_drop() {
        let surface = Arc::new(CountingSurface::default());
        {
            let first = SurfaceLease::acquire(surface.clone());
            let second = SurfaceLease::acquire(surface.clone());
            assert_ne!(first.handle(), second.handle());
            assert_eq!(surface.live(), 2);
        }
        assert_eq!(surface.live(), 0);
    }
}
