use activity_insights::aggregator::{analyze, calculate_activity_distribution, calculate_user_activity_levels};
use activity_insights::parser::{load_activity_reader, ActivityLevel};
use activity_insights::utils::AnalysisError;
use chrono::Weekday;
use pretty_assertions::assert_eq;

// User A: Monday 3000, Tuesday 12000. User B: Monday 8000, Tuesday 6000.
const TWO_USERS_TWO_DAYS: &str = "\
Id,ActivityDate,TotalSteps,Calories,VeryActiveMinutes,FairlyActiveMinutes,LightlyActiveMinutes,SedentaryMinutes
A,2016-04-11,3000,1800,10,5,100,600
A,2016-04-12,12000,2600,10,5,100,600
B,2016-04-11,8000,2300,10,5,100,600
B,2016-04-12,6000,2100,10,5,100,600
";

const HEADER_ONLY: &str =
    "Id,ActivityDate,TotalSteps,Calories,VeryActiveMinutes,FairlyActiveMinutes,LightlyActiveMinutes,SedentaryMinutes\n";

#[test]
fn test_record_distribution_one_per_bucket() {
    let table = load_activity_reader(TWO_USERS_TWO_DAYS.as_bytes()).unwrap();
    let dist = calculate_activity_distribution(table.records());

    for level in ActivityLevel::ALL {
        assert_eq!(dist.share(level), Some(25.0), "{}", level);
    }
    assert_eq!(dist.total(), 100.0);
}

#[test]
fn test_user_levels_from_mean_steps() {
    let table = load_activity_reader(TWO_USERS_TWO_DAYS.as_bytes()).unwrap();
    let users = calculate_user_activity_levels(table.records());

    // A averages 7500 (Fairly Active), B averages 7000 (Lightly Active)
    assert_eq!(users.share(ActivityLevel::FairlyActive), Some(50.0));
    assert_eq!(users.share(ActivityLevel::LightlyActive), Some(50.0));
    assert_eq!(users.share(ActivityLevel::VeryActive), Some(0.0));
    assert_eq!(users.share(ActivityLevel::Sedentary), Some(0.0));
}

#[test]
fn test_full_analysis() {
    let table = load_activity_reader(TWO_USERS_TWO_DAYS.as_bytes()).unwrap();
    let result = analyze(&table).unwrap();

    assert_eq!(result.basic_stats.total_records, 4);
    assert_eq!(result.basic_stats.unique_users, 2);
    assert_eq!(result.basic_stats.date_range(), "2016-04-11 to 2016-04-12");
    assert_eq!(result.basic_stats.avg_steps, 7250.0);
    assert_eq!(result.basic_stats.avg_sedentary_hours, 10.0);

    assert_eq!(result.daily_averages.lightly_active_minutes, 100.0);

    let weekly = &result.weekly_patterns;
    assert_eq!(weekly.days().len(), 7);
    assert_eq!(weekly.get(Weekday::Mon), Some(5500.0));
    assert_eq!(weekly.get(Weekday::Tue), Some(9000.0));
    assert_eq!(weekly.get(Weekday::Sat), None);
    assert_eq!(weekly.most_active(), Some(Weekday::Tue));
    assert_eq!(weekly.least_active(), Some(Weekday::Mon));

    let weekday = result.weekend_comparison.weekday.as_ref().unwrap();
    assert_eq!(weekday.records, 4);
    assert_eq!(weekday.mean_steps, 7250.0);
    assert!(result.weekend_comparison.weekend.is_none());

    let r = result.steps_calories_correlation.unwrap();
    assert!(r > 0.99 && r <= 1.0);
}

#[test]
fn test_boundary_steps_classify_upward() {
    let input = "\
Id,ActivityDate,TotalSteps,Calories,VeryActiveMinutes,FairlyActiveMinutes,LightlyActiveMinutes,SedentaryMinutes
a,2016-04-11,4999,1800,0,0,0,0
a,2016-04-12,5000,1800,0,0,0,0
a,2016-04-13,7500,1800,0,0,0,0
a,2016-04-14,10000,1800,0,0,0,0
";
    let table = load_activity_reader(input.as_bytes()).unwrap();
    let levels: Vec<ActivityLevel> = table.records().iter().map(|r| r.activity_level).collect();

    assert_eq!(levels, ActivityLevel::ALL.to_vec());
    // Zero logged minutes: no division by zero
    assert!(table.records().iter().all(|r| r.activity_percentage == 0.0));
}

#[test]
fn test_empty_input_is_degenerate() {
    let table = load_activity_reader(HEADER_ONLY.as_bytes()).unwrap();

    assert!(table.is_empty());
    assert!(matches!(analyze(&table), Err(AnalysisError::NoRecords)));
}

#[test]
fn test_boundary_user_scenario() {
    let input = "\
Id,ActivityDate,TotalSteps,Calories,VeryActiveMinutes,FairlyActiveMinutes,LightlyActiveMinutes,SedentaryMinutes
A,2016-04-11,3000,1600,0,0,10,1430
A,2016-04-12,12000,2900,60,20,40,1320
B,2016-04-11,8000,2200,20,15,200,900
B,2016-04-12,6000,2000,5,10,180,1000
";
    let table = load_activity_reader(input.as_bytes()).unwrap();
    let result = analyze(&table).unwrap();

    assert_eq!(table.records()[1].total_active_minutes, 120.0);
    assert_eq!(result.basic_stats.records_over_day_length, 0);
    for level in ActivityLevel::ALL {
        assert_eq!(result.activity_distribution.share(level), Some(25.0));
    }
    // A's mean of exactly 7500 sits on the lower bound of Fairly Active
    assert_eq!(result.user_activity_levels.share(ActivityLevel::FairlyActive), Some(50.0));
    assert_eq!(result.weekly_patterns.get(Weekday::Mon), Some(5500.0));
    assert_ne!(result.user_activity_levels, result.activity_distribution);
}
