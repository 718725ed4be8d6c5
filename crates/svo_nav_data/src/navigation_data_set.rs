use crate::{BoundsNavigationData, PersistenceError};

use serde::{Deserialize, Serialize};
use svo_nav_core::prelude::*;

/// The navigation data of every bounded volume in a world.
///
/// Volumes may overlap. When several volumes contain a query, the one that was added first serves it.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct NavigationDataSet {
    navigation_bounds_data: Vec<BoundsNavigationData>,
}

impl NavigationDataSet {
    #[inline]
    pub fn navigation_bounds_data(&self) -> &[BoundsNavigationData] {
        &self.navigation_bounds_data
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.navigation_bounds_data.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.navigation_bounds_data.len()
    }

    pub fn add_navigation_bounds_data(&mut self, data: BoundsNavigationData) {
        self.navigation_bounds_data.push(data);
    }

    /// Removes every volume whose navigation bounds intersect `bounds`, touching included. Links into removed volumes dangle.
    pub fn remove_data_in_bounds(&mut self, bounds: &Extent3f) {
        let before = self.navigation_bounds_data.len();
        self.navigation_bounds_data
            .retain(|data| !data.navigation_bounds().intersects(bounds));
        tracing::debug!(
            "Removed {} navigation volumes intersecting {:?}",
            before - self.navigation_bounds_data.len(),
            bounds
        );
    }

    pub fn clear_data(&mut self) {
        self.navigation_bounds_data.clear();
    }

    /// The union of all navigation bounds, or the default (empty) box if there are no volumes.
    pub fn bounding_box(&self) -> Extent3f {
        self.navigation_bounds_data
            .iter()
            .map(|data| *data.navigation_bounds())
            .fold(None, |acc: Option<Extent3f>, b| {
                Some(acc.map_or(b, |acc| acc.union(&b)))
            })
            .unwrap_or_default()
    }

    /// The first volume whose navigation bounds contain all of `points`. Returns `None` if `points` is empty.
    pub fn bounds_navigation_data_containing_points(
        &self,
        points: &[Point3f],
    ) -> Option<&BoundsNavigationData> {
        if points.is_empty() {
            return None;
        }

        self.navigation_bounds_data.iter().find(|data| {
            points
                .iter()
                .all(|p| data.navigation_bounds().contains_point(*p))
        })
    }

    pub fn allocated_size(&self) -> usize {
        std::mem::size_of::<Self>()
            + (self.navigation_bounds_data.capacity() - self.navigation_bounds_data.len())
                * std::mem::size_of::<BoundsNavigationData>()
            + self
                .navigation_bounds_data
                .iter()
                .map(BoundsNavigationData::allocated_size)
                .sum::<usize>()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, PersistenceError> {
        bincode::serialize(self).map_err(PersistenceError::Encode)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PersistenceError> {
        let set: Self = bincode::deserialize(bytes).map_err(PersistenceError::Decode)?;
        for data in set.navigation_bounds_data.iter() {
            data.check_header()?;
        }

        Ok(set)
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝

#[cfg(test)]
mod test {
    use super::*;

    use crate::BoundsGenerationSettings;

    use pretty_assertions::assert_eq;

    fn volume_at(min: f32) -> BoundsNavigationData {
        let volume = Extent3f::from_min_and_shape(Point3f::fill(min), Point3f::fill(100.0));
        let empty_world = |_: Point3f, _: f32| false;

        BoundsNavigationData::generate(
            volume,
            &BoundsGenerationSettings::with_voxel_size(100.0),
            &empty_world,
        )
        .unwrap()
    }

    fn two_volumes() -> NavigationDataSet {
        let mut set = NavigationDataSet::default();
        set.add_navigation_bounds_data(volume_at(0.0));
        set.add_navigation_bounds_data(volume_at(200.0));

        set
    }

    #[test]
    fn containment_picks_the_volume_with_all_points() {
        let set = two_volumes();

        let found = set
            .bounds_navigation_data_containing_points(&[PointN([50.0, 50.0, 50.0])])
            .unwrap();
        assert_eq!(found.navigation_bounds().minimum, Point3f::fill(0.0));

        let found = set
            .bounds_navigation_data_containing_points(&[
                PointN([250.0, 250.0, 250.0]),
                PointN([300.0, 200.0, 300.0]),
            ])
            .unwrap();
        assert_eq!(found.navigation_bounds().minimum, Point3f::fill(200.0));

        assert!(set
            .bounds_navigation_data_containing_points(&[
                PointN([50.0, 50.0, 50.0]),
                PointN([250.0, 250.0, 250.0]),
            ])
            .is_none());
        assert!(set
            .bounds_navigation_data_containing_points(&[PointN([150.0, 150.0, 150.0])])
            .is_none());
        assert!(set.bounds_navigation_data_containing_points(&[]).is_none());
    }

    #[test]
    fn first_added_volume_wins() {
        let mut set = NavigationDataSet::default();
        set.add_navigation_bounds_data(volume_at(0.0));
        set.add_navigation_bounds_data(volume_at(50.0));

        let found = set
            .bounds_navigation_data_containing_points(&[PointN([75.0, 75.0, 75.0])])
            .unwrap();
        assert_eq!(found.navigation_bounds().minimum, Point3f::fill(0.0));
    }

    #[test]
    fn bounding_box_is_union() {
        assert_eq!(NavigationDataSet::default().bounding_box(), Extent3f::default());
        assert_eq!(
            two_volumes().bounding_box(),
            Extent3f::from_min_and_shape(Point3f::fill(0.0), Point3f::fill(300.0))
        );
    }

    #[test]
    fn remove_intersecting_volumes() {
        let mut set = two_volumes();

        set.remove_data_in_bounds(&Extent3f::from_min_and_shape(
            Point3f::fill(120.0),
            Point3f::fill(10.0),
        ));
        assert_eq!(set.len(), 2);

        // Touching counts as intersecting.
        set.remove_data_in_bounds(&Extent3f::from_min_and_shape(
            Point3f::fill(150.0),
            Point3f::fill(50.0),
        ));
        assert_eq!(set.len(), 1);
        assert_eq!(
            set.navigation_bounds_data()[0].navigation_bounds().minimum,
            Point3f::fill(0.0)
        );

        set.clear_data();
        assert!(set.is_empty());
        assert_eq!(set.bounding_box(), Extent3f::default());
    }

    #[test]
    fn bytes_round_trip() {
        let set = two_volumes();
        let bytes = set.to_bytes().unwrap();
        let back = NavigationDataSet::from_bytes(&bytes).unwrap();

        assert_eq!(back.len(), 2);
        for (a, b) in set.navigation_bounds_data().iter().zip(back.navigation_bounds_data()) {
            assert_eq!(a.octree_data(), b.octree_data());
            assert_eq!(a.navigation_bounds(), b.navigation_bounds());
            assert_eq!(a.volume_bounds(), b.volume_bounds());
            assert_eq!(a.layer_count(), b.layer_count());
        }
        assert!(set.allocated_size() > 0);
        assert!(matches!(
            NavigationDataSet::from_bytes(&bytes[..bytes.len() / 2]),
            Err(PersistenceError::Decode(_))
        ));
    }
}
