/*
 * Unit tests for the scheduler module
 *
 * The unit tests follows the Arrange, Act, Assert pattern.
 *
 * Tests:
 * - test_pick_up_time_idle
 * - test_pick_up_time_same_direction_ahead
 * - test_pick_up_time_same_direction_passed
 * - test_pick_up_time_opposite_direction
 * - test_pick_up_time_full_elevator_on_pickup_floor
 * - test_pick_up_time_approaching_bound
 * - test_idle_tie_takes_lowest_id
 * - test_simultaneous_requests_prefer_moving_elevator
 * - test_opposite_request_goes_to_idle_elevator
 * - test_scheduler_does_not_move_elevators
 *
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod scheduler_tests {
    use crate::config::BuildingConfig;
    use crate::dispatcher::Dispatcher;
    use crate::elevator::{Elevator, Tier};
    use crate::scheduler::Scheduler;
    use crate::shared::events::RecordingSink;
    use crate::shared::Direction::{Down, Up};
    use crate::shared::{Passenger, SimEvent};

    fn setup_dispatcher(elevators: usize, floors: u32) -> Dispatcher {
        let config = BuildingConfig {
            elevators,
            floors,
            capacity: 10,
        };
        Dispatcher::new(&config).unwrap()
    }

    /// Elevator of a 50 floor building at `floor`, already sweeping in `direction`.
    fn sweeping_elevator(floor: u32, direction: crate::shared::Direction) -> Elevator {
        let mut elevator = Elevator::new(0, 50, 10);
        elevator.test_set_floor(floor);
        elevator.start_trip(floor, direction);
        elevator
    }

    fn assigned_elevators(sink: &RecordingSink) -> Vec<(String, usize)> {
        sink.events
            .iter()
            .filter_map(|event| match event {
                SimEvent::Assigned { passenger, elevator, .. } => Some((passenger.clone(), *elevator)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_pick_up_time_idle() {
        // Purpose: Verify that an idle elevator only needs the distance to the pickup floor

        // Arrange
        let scheduler = Scheduler::new();
        let mut elevator = Elevator::new(0, 50, 10);
        elevator.test_set_floor(12);

        // Assert
        assert_eq!(scheduler.get_elevator_pick_up_time(&elevator, 4, Up), 8);
        assert_eq!(scheduler.get_elevator_pick_up_time(&elevator, 30, Down), 18);
    }

    #[test]
    fn test_pick_up_time_same_direction_ahead() {
        // Purpose: Verify the plain distance for a rider still ahead of the sweep

        // Arrange
        let scheduler = Scheduler::new();
        let up = sweeping_elevator(20, Up);
        let down = sweeping_elevator(20, Down);

        // Assert
        assert_eq!(scheduler.get_elevator_pick_up_time(&up, 26, Up), 6);
        assert_eq!(scheduler.get_elevator_pick_up_time(&up, 20, Up), 0);
        assert_eq!(scheduler.get_elevator_pick_up_time(&down, 11, Down), 9);
    }

    #[test]
    fn test_pick_up_time_same_direction_passed() {
        // Purpose: Verify run to the terminus and back for a rider the sweep has passed

        // Arrange
        let scheduler = Scheduler::new();
        let up = sweeping_elevator(20, Up);
        let down = sweeping_elevator(10, Down);

        // Assert
        assert_eq!(scheduler.get_elevator_pick_up_time(&up, 5, Up), 30 + 45);
        assert_eq!(scheduler.get_elevator_pick_up_time(&down, 15, Down), 9 + 14);
    }

    #[test]
    fn test_pick_up_time_opposite_direction() {
        // Purpose: Verify terminus, full span and approach for a rider going the other way

        // Arrange
        let scheduler = Scheduler::new();
        let up = sweeping_elevator(20, Up);
        let down = sweeping_elevator(20, Down);

        // Assert
        assert_eq!(scheduler.get_elevator_pick_up_time(&up, 30, Down), 30 + 49 + 29);
        assert_eq!(scheduler.get_elevator_pick_up_time(&down, 30, Up), 19 + 49 + 20);
    }

    #[test]
    fn test_pick_up_time_full_elevator_on_pickup_floor() {
        // Purpose: Verify that a full car on the pickup floor is estimated as having passed it

        // Arrange
        let scheduler = Scheduler::new();
        let mut elevator = Elevator::new(0, 50, 1);
        elevator.test_set_floor(20);
        elevator.start_trip(20, Up);
        let free = elevator.clone();
        elevator.add_passenger(Passenger::new("onboard", 20, 30, 0), 0).unwrap();

        // Assert
        assert_eq!(scheduler.get_elevator_pick_up_time(&free, 20, Up), 0);
        assert_eq!(scheduler.get_elevator_pick_up_time(&elevator, 20, Up), 30 + 30);
        assert_eq!(scheduler.get_elevator_pick_up_time(&elevator, 26, Up), 6);
    }

    #[test]
    fn test_pick_up_time_approaching_bound() {
        // Purpose: Verify travel through the bound for an elevator that has not started its sweep

        // Arrange
        let scheduler = Scheduler::new();
        let mut elevator = Elevator::new(0, 50, 10);
        elevator.test_set_floor(15);
        elevator.start_trip(8, Up);

        // Assert
        assert_eq!(scheduler.get_elevator_pick_up_time(&elevator, 12, Up), 7 + 4);
        assert_eq!(scheduler.get_elevator_pick_up_time(&elevator, 4, Up), 11);
    }

    #[test]
    fn test_idle_tie_takes_lowest_id() {
        // Purpose: Verify that equal idle estimates resolve to the first elevator

        // Arrange
        let scheduler = Scheduler::new();
        let dispatcher = setup_dispatcher(3, 50);

        // Act
        let chosen = scheduler.get_min_trip_elevator(dispatcher.elevators(), 1, Up);

        // Assert
        assert_eq!(chosen, Some((0, 0)));
    }

    #[test]
    fn test_simultaneous_requests_prefer_moving_elevator() {
        // Purpose: Verify the tie-break for two requests admitted in the same tick

        // Arrange
        let scheduler = Scheduler::new();
        let mut dispatcher = setup_dispatcher(2, 50);
        let mut sink = RecordingSink::default();
        let passengers = vec![Passenger::new("pass1", 1, 37, 2), Passenger::new("pass2", 2, 16, 2)];

        // Act
        scheduler
            .schedule_elevator(&mut dispatcher, passengers, 2, &mut sink)
            .unwrap();

        // Assert
        // pass2 ties at one tick between the elevator now in use and the idle one.
        assert_eq!(
            assigned_elevators(&sink),
            vec![("pass1".to_string(), 0), ("pass2".to_string(), 0)]
        );
        let queue = dispatcher.queue(0).unwrap();
        assert_eq!(queue.find("pass1"), Some(Tier::Current));
        assert_eq!(queue.find("pass2"), Some(Tier::Current));
        assert!(dispatcher.elevator(1).unwrap().is_idle());
    }

    #[test]
    fn test_opposite_request_goes_to_idle_elevator() {
        // Purpose: Verify that a rider against the running sweep is given to a free elevator

        // Arrange
        let scheduler = Scheduler::new();
        let mut dispatcher = setup_dispatcher(2, 50);
        let mut sink = RecordingSink::default();
        let passengers = vec![Passenger::new("up", 1, 37, 0), Passenger::new("down", 2, 1, 0)];

        // Act
        scheduler
            .schedule_elevator(&mut dispatcher, passengers, 0, &mut sink)
            .unwrap();

        // Assert
        assert_eq!(
            assigned_elevators(&sink),
            vec![("up".to_string(), 0), ("down".to_string(), 1)]
        );
        let second = dispatcher.elevator(1).unwrap();
        assert_eq!(second.direction(), Some(Up));
        assert_eq!(second.passenger_direction(), Some(Down));
    }

    #[test]
    fn test_scheduler_does_not_move_elevators() {
        // Purpose: Verify that scheduling leaves positions untouched until the next move

        // Arrange
        let scheduler = Scheduler::new();
        let mut dispatcher = setup_dispatcher(1, 20);
        let mut sink = RecordingSink::default();

        // Act
        scheduler
            .schedule_elevator(&mut dispatcher, vec![Passenger::new("a", 9, 3, 0)], 0, &mut sink)
            .unwrap();

        // Assert
        let elevator = dispatcher.elevator(0).unwrap();
        assert_eq!(elevator.at_floor(), 1);
        assert_eq!(elevator.direction(), Some(Up));
        assert_eq!(elevator.pickup_floor_bound(), 9);
    }
}
