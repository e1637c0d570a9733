use crate::model::{
    booking::{
        event::{CreateBooking, UpdateBookingStatus},
        slot::ReservedSlot,
        Booking, BookingListOptions, BookingStatusChange,
    },
    id::{BookingId, HallId},
};
use async_trait::async_trait;
use chrono::NaiveDate;
use shared::error::AppResult;

#[async_trait]
pub trait BookingRepository: Send + Sync {
    // 空き確認・料金計算・登録を一つのトランザクションで行う
    // - 時間帯が重なる予約があれば Conflict
    // - ホールが存在しなければ EntityNotFound
    async fn create(&self, event: CreateBooking) -> AppResult<Booking>;
    // 現在のステータスから遷移可能か確認したうえで更新する
    async fn update_status(&self, event: UpdateBookingStatus) -> AppResult<BookingStatusChange>;
    async fn find_all(&self, options: BookingListOptions) -> AppResult<Vec<Booking>>;
    async fn find_by_id(&self, booking_id: BookingId) -> AppResult<Option<Booking>>;
    // キャンセルされていない、指定日の予約枠を取得する
    async fn find_reserved_slots(
        &self,
        hall_id: &HallId,
        event_date: NaiveDate,
    ) -> AppResult<Vec<ReservedSlot>>;
}
