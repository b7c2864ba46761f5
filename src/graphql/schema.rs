use async_graphql::{
    dataloader::DataLoader, extensions::Tracing, EmptySubscription, MergedObject, Schema,
};

use crate::graphql::loaders::{PostsByAuthorLoader, UserLoader};
use crate::posts::{PostMutation, PostQuery};
use crate::store::DynStore;
use crate::users::{UserMutation, UserQuery};

#[derive(MergedObject, Default)]
pub struct Query(UserQuery, PostQuery);

#[derive(MergedObject, Default)]
pub struct Mutation(UserMutation, PostMutation);

pub type AppSchema = Schema<Query, Mutation, EmptySubscription>;

/// Build the schema over `store`. With `batch_relations` the relation fields
/// go through DataLoaders instead of one lookup per parent.
pub fn build_schema(store: DynStore, batch_relations: bool) -> AppSchema {
    let mut builder = Schema::build(Query::default(), Mutation::default(), EmptySubscription)
        .extension(Tracing)
        .data(store.clone());
    if batch_relations {
        builder = builder
            .data(DataLoader::new(UserLoader::new(store.clone()), tokio::spawn))
            .data(DataLoader::new(PostsByAuthorLoader::new(store), tokio::spawn));
    }
    builder.finish()
}
