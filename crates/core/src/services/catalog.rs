//! All curated content lists, one service each.

use tvk_db::entities::{
    Achievement, Banner, Entity, Event, IdeologyPoint, LeadershipMember, ManifestoPoint,
    MediaAsset,
};
use tvk_db::repositories::ActivityLog;
use tvk_db::SharedStore;

use super::content::ContentService;
use super::reorder::ContentKind;

/// Content services for every admin-editable list.
#[derive(Clone)]
pub struct Catalog {
    pub banners: ContentService<Banner>,
    pub events: ContentService<Event>,
    pub manifesto: ContentService<ManifestoPoint>,
    pub leadership: ContentService<LeadershipMember>,
    pub ideology: ContentService<IdeologyPoint>,
    pub achievements: ContentService<Achievement>,
    pub media: ContentService<MediaAsset>,
}

impl Catalog {
    /// Create services for every list over `store`.
    #[must_use]
    pub fn new(store: SharedStore, log: ActivityLog) -> Self {
        Self {
            banners: ContentService::new(store.clone(), log.clone()),
            events: ContentService::new(store.clone(), log.clone()),
            manifesto: ContentService::new(store.clone(), log.clone()),
            leadership: ContentService::new(store.clone(), log.clone()),
            ideology: ContentService::new(store.clone(), log.clone()),
            achievements: ContentService::new(store.clone(), log.clone()),
            media: ContentService::new(store, log),
        }
    }

    /// The service for `T`.
    #[must_use]
    pub fn service<T: CatalogEntry>(&self) -> &ContentService<T> {
        T::service(self)
    }
}

/// A record type with its own list in the [`Catalog`].
pub trait CatalogEntry: Entity {
    /// Which list this type lives in.
    const KIND: ContentKind;

    /// Select this type's service.
    fn service(catalog: &Catalog) -> &ContentService<Self>;
}

macro_rules! catalog_entry {
    ($ty:ty, $kind:ident, $field:ident) => {
        impl CatalogEntry for $ty {
            const KIND: ContentKind = ContentKind::$kind;

            fn service(catalog: &Catalog) -> &ContentService<Self> {
                &catalog.$field
            }
        }
    };
}

catalog_entry!(Banner, Banners, banners);
catalog_entry!(Event, Events, events);
catalog_entry!(ManifestoPoint, ManifestoPoints, manifesto);
catalog_entry!(LeadershipMember, Leadership, leadership);
catalog_entry!(IdeologyPoint, Ideology, ideology);
catalog_entry!(Achievement, Achievements, achievements);
catalog_entry!(MediaAsset, Media, media);

#[cfg(test)]
mod tests {
    use super::*;
    use tvk_db::test_utils::seeded_store;

    #[tokio::test]
    async fn test_service_selects_matching_list() {
        let store = seeded_store().await;
        let catalog = Catalog::new(store.clone(), ActivityLog::new(store));

        assert_eq!(catalog.service::<Banner>().list().await.unwrap().len(), 2);
        assert_eq!(catalog.service::<ManifestoPoint>().list().await.unwrap().len(), 4);
        assert_eq!(<MediaAsset as CatalogEntry>::KIND, ContentKind::Media);
    }
}
