use crate::errors::StoreError;
use crate::state::collection::JsonCollection;
use crate::state::ids::IdGenerator;
use crate::state::records::DataItem;

pub async fn list(data: &JsonCollection<DataItem>) -> Result<Vec<DataItem>, StoreError> {
    data.load().await
}

/// Append a new item named `name`. The id is drawn while the collection is
/// held, so file order follows id order.
pub async fn create(
    data: &JsonCollection<DataItem>,
    ids: &IdGenerator,
    name: String,
) -> Result<DataItem, StoreError> {
    let item = data
        .modify(|items| {
            let item = DataItem::new(ids.next_id(), name);
            items.push(item.clone());
            item
        })
        .await?;

    tracing::debug!("Created {} item {:?}", data.name(), item.id());
    Ok(item)
}

/// Rename every item whose id is `id`. Returns the first renamed item, or
/// `None` when nothing matched. Other items keep their position and content.
///
/// `None` for `id` matches nothing but still loads and rewrites the file.
pub async fn update(
    data: &JsonCollection<DataItem>,
    id: Option<i64>,
    name: String,
) -> Result<Option<DataItem>, StoreError> {
    data.modify(move |items| {
        let mut first = None;
        for item in items.iter_mut().filter(|item| item.has_id(id)) {
            item.set_name(&name);
            if first.is_none() {
                first = Some(item.clone());
            }
        }
        first
    })
    .await
}

/// Remove every item whose id is `id`, returning how many went away.
pub async fn delete(
    data: &JsonCollection<DataItem>,
    id: Option<i64>,
) -> Result<usize, StoreError> {
    let removed = data
        .modify(move |items| {
            let before = items.len();
            items.retain(|item| !item.has_id(id));
            before - items.len()
        })
        .await?;

    tracing::debug!("Deleted {} {} item(s) with id {:?}", removed, data.name(), id);
    Ok(removed)
}
