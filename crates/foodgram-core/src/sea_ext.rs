use foodgram_domain::pagination::PageRequest;
use sea_orm::{EntityTrait, QuerySelect, Select};

/// Apply `LIMIT`/`OFFSET` from a [`PageRequest`] to a select.
pub trait Paginate {
    fn paginate_by(self, page: PageRequest) -> Self;
}

impl<E> Paginate for Select<E>
where
    E: EntityTrait,
{
    fn paginate_by(self, page: PageRequest) -> Self {
        let page = page.clamped();
        self.offset(page.offset()).limit(u64::from(page.limit))
    }
}
