use mm_core::WorkOrder;

use crate::display::round_to;

/// Mean effective repair time in hours, one decimal.
///
/// Only done orders with a positive `effective_repair_minutes` take part; orders
/// without a repair timeline are left out rather than counted as zero.
pub fn compute_mttr<'a, I>(orders: I) -> f64
where
    I: IntoIterator<Item = &'a WorkOrder>,
{
    let (total, count) = orders
        .into_iter()
        .filter(|order| order.is_done())
        .filter_map(WorkOrder::effective_repair_minutes)
        .filter(|minutes| *minutes > 0)
        .fold((0u64, 0u64), |(total, count), minutes| {
            (total + u64::from(minutes), count + 1)
        });

    if count == 0 {
        return 0.0;
    }
    round_to(total as f64 / count as f64 / 60.0, 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{at, done_order};
    use mm_core::WorkOrderStatus;

    #[test]
    fn empty_input_is_zero() {
        assert_eq!(compute_mttr(&Vec::<WorkOrder>::new()), 0.0);
    }

    #[test]
    fn averages_done_orders() {
        let orders = vec![done_order("1", "m1", 60, 90), done_order("2", "m2", 180, 200)];
        assert_eq!(compute_mttr(&orders), 2.0);
    }

    #[test]
    fn ignores_orders_without_repair_time() {
        let orders = vec![
            done_order("1", "m1", 0, 30),
            done_order("2", "m1", 90, 90).with_status(WorkOrderStatus::InProgress),
            WorkOrder::new("3", "m1", at(4, 8, 0, 0)).with_status(WorkOrderStatus::Done),
        ];
        assert_eq!(compute_mttr(&orders), 0.0);

        let mut with_one = orders.clone();
        with_one.push(done_order("4", "m1", 45, 60));
        assert_eq!(compute_mttr(&with_one), 0.8);
    }

    #[test]
    fn independent_of_order() {
        let mut orders = vec![
            done_order("1", "m1", 35, 40),
            done_order("2", "m2", 125, 130),
            done_order("3", "m3", 61, 70),
        ];
        let forward = compute_mttr(&orders);
        orders.reverse();
        assert_eq!(compute_mttr(&orders), forward);
        assert_eq!(forward, 1.2);
    }
}
