use crate::model::{
    hall::{
        event::{CreateHall, UpdateHall},
        Hall,
    },
    id::HallId,
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait HallRepository: Send + Sync {
    // ホールを登録する。同じ ID がすでにあれば Conflict
    async fn create(&self, event: CreateHall) -> AppResult<Hall>;
    // 指定したフィールドだけを更新する
    async fn update(&self, hall_id: HallId, event: UpdateHall) -> AppResult<Hall>;
    async fn find_all(&self) -> AppResult<Vec<Hall>>;
    async fn find_by_id(&self, hall_id: &HallId) -> AppResult<Option<Hall>>;
}
